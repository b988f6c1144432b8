use crate::Attributes;

pub const VERSION: &str = "version";
pub const MAJOR_MINOR_VERSION: &str = "majorMinorVersion";

/// Release information the default attributes are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    version: String,
}

impl Release {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `major.minor` part of the version, e.g. `26.1` for `26.1.3`.
    ///
    /// Versions with fewer than two dot separated components are returned as is.
    pub fn short_version(&self) -> &str {
        match self.version.match_indices('.').nth(1) {
            Some((i, _)) => &self.version[..i],
            None => &self.version,
        }
    }
}

/// Attributes applied to every conversion unless overridden per call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultAttributes {
    attributes: Attributes,
}

impl DefaultAttributes {
    pub fn from_release(release: &Release) -> Self {
        let mut attributes = Attributes::new();
        attributes.insert(VERSION, release.version());
        attributes.insert(MAJOR_MINOR_VERSION, release.short_version());

        Self { attributes }
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl From<Attributes> for DefaultAttributes {
    fn from(attributes: Attributes) -> Self {
        Self { attributes }
    }
}
