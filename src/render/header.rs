//! Document header: the attributes a document declares about itself in its frontmatter.

use markdown::mdast::Node;

use crate::Attributes;
use crate::Error;

pub const DOCTITLE: &str = "doctitle";
pub const TITLE: &str = "title";

/// Attributes and layout facts discovered in a parsed document.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// Attributes declared in the frontmatter.
    pub attributes: Attributes,

    /// Byte offset where the body begins, i.e. right after the frontmatter.
    pub body_offset: usize,

    /// Text of the first level-1 heading.
    pub heading: Option<String>,
}

impl Header {
    /// Extract the header from the root node returned by the engine.
    pub fn from_root(root: &Node) -> Result<Self, Error> {
        let Node::Root(root) = root else {
            return Ok(Self::default());
        };

        let mut header = Self::default();

        let frontmatter = root.children.first().and_then(|n| match n {
            Node::Yaml(y) => Some((Self::parse_yaml(&y.value), n)),
            Node::Toml(t) => Some((Self::parse_toml(&t.value), n)),
            _ => None,
        });

        if let Some((attributes, node)) = frontmatter {
            header.attributes = attributes?;
            header.body_offset = node.position().map(|p| p.end.offset).unwrap_or(0);
        }

        header.heading = root.children.iter().find_map(|n| match n {
            Node::Heading(h) if h.depth == 1 => Some(n.to_string()),
            _ => None,
        });

        Ok(header)
    }

    fn parse_yaml(text: &str) -> Result<Attributes, Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| Error::Header {
            reason: e.to_string(),
        })?;

        let mapping = match value {
            serde_yaml::Value::Null => return Ok(Attributes::new()),
            serde_yaml::Value::Mapping(m) => m,
            other => {
                return Err(Error::Header {
                    reason: format!("expected a mapping, got {:?}", other),
                })
            }
        };

        let mut attributes = Attributes::new();

        for (k, v) in mapping {
            let Some(key) = Self::yaml_scalar(&k) else {
                log::warn!("skip header entry with non scalar key: {:?}", k);
                continue;
            };

            match Self::yaml_scalar(&v) {
                Some(value) => {
                    attributes.insert(key, value);
                }
                None => log::warn!("skip header attribute {}: value is not a scalar", key),
            }
        }

        Ok(attributes)
    }

    fn yaml_scalar(v: &serde_yaml::Value) -> Option<String> {
        match v {
            serde_yaml::Value::Null => Some(String::new()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Tagged(t) => Self::yaml_scalar(&t.value),
            serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
        }
    }

    fn parse_toml(text: &str) -> Result<Attributes, Error> {
        let table: toml::Table = text.parse().map_err(|e: toml::de::Error| Error::Header {
            reason: e.to_string(),
        })?;

        let mut attributes = Attributes::new();

        for (key, v) in table {
            let value = match v {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Datetime(d) => d.to_string(),
                toml::Value::Array(_) | toml::Value::Table(_) => {
                    log::warn!("skip header attribute {}: value is not a scalar", key);
                    continue;
                }
            };
            attributes.insert(key, value);
        }

        Ok(attributes)
    }
}
