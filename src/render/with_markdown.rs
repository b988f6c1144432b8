use markdown::mdast::Node;
use markdown::Options;

use crate::render::profile::RenderProfile;
use crate::Error;

/// The markdown engine configured with a [`RenderProfile`].
///
/// Building the options once and reusing them for every call is what the
/// converter owns as its "engine instance".
pub struct WithMarkdown {
    options: Options,
}

impl WithMarkdown {
    pub fn new(profile: &RenderProfile) -> Self {
        Self {
            options: profile.engine_options(),
        }
    }

    /// Render markup to an HTML fragment.
    pub fn render(&self, markup: &str) -> Result<String, Error> {
        markdown::to_html_with_options(markup, &self.options)
            .map_err(|e| Error::Convert(e.to_string()))
    }

    /// Parse markup into a syntax tree without rendering it.
    pub fn load(&self, markup: &str) -> Result<Node, Error> {
        markdown::to_mdast(markup, &self.options.parse).map_err(|e| Error::Convert(e.to_string()))
    }
}
