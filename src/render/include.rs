use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::render::fence::Fence;
use crate::render::profile::SafeMode;
use crate::Attributes;

/// Matches a whole-line `include::target[]` directive.
static DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^include::([^\[\s][^\[]*)\[[^\]]*\]\s*$").unwrap());

pub const MAX_DEPTH: usize = 64;

/// Inlines `include::` directives.
pub struct Includes<'a> {
    pub attributes: &'a Attributes,
    pub safe_mode: SafeMode,
}

impl Includes<'_> {
    /// Expand every include directive in `text`.
    ///
    /// `doc` names the document in the placeholder left for unreadable targets.
    pub fn expand(&self, text: &str, base_dir: &Path, doc: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.expand_into(&mut out, text, base_dir, doc, 0);
        out
    }

    fn expand_into(&self, out: &mut String, text: &str, base_dir: &Path, doc: &str, depth: usize) {
        let mut fence = Fence::default();

        for line in text.split_inclusive('\n') {
            if fence.feed(line) {
                out.push_str(line);
                continue;
            }

            let Some(caps) = DIRECTIVE.captures(line.trim_end_matches(['\r', '\n'])) else {
                out.push_str(line);
                continue;
            };

            let target = self.attributes.substitute(caps[1].trim_end());

            if self.safe_mode == SafeMode::Secure {
                out.push_str(&format!("[{}]({})\n", target, target));
                continue;
            }

            if depth >= MAX_DEPTH {
                log::warn!(
                    "include depth {} exceeded in {}, skipping {}",
                    MAX_DEPTH,
                    doc,
                    target
                );
                out.push_str(line);
                continue;
            }

            let path = base_dir.join(&target);

            match fs::read_to_string(&path) {
                Ok(content) => {
                    log::debug!("include {} into {}", path.display(), doc);

                    let nested_base = path.parent().unwrap_or(base_dir);
                    let nested_doc = path.display().to_string();
                    self.expand_into(out, &content, nested_base, &nested_doc, depth + 1);

                    if !content.is_empty() && !content.ends_with('\n') {
                        out.push('\n');
                    }
                }
                Err(e) => {
                    log::warn!("include {} not readable: {}", path.display(), e);
                    out.push_str(&format!(
                        "Unresolved directive in {} - include::{}[]\n",
                        doc, target
                    ));
                }
            }
        }
    }
}
