use markdown::CompileOptions;
use markdown::Constructs;
use markdown::Options;
use markdown::ParseOptions;

use crate::Attributes;

/// How much the document may reach outside itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SafeMode {
    /// Includes may read any path and raw HTML is passed through.
    #[default]
    Unsafe,
    /// Includes become links, raw HTML and dangerous protocols are escaped.
    Secure,
}

impl SafeMode {
    pub fn name(&self) -> &'static str {
        match self {
            SafeMode::Unsafe => "unsafe",
            SafeMode::Secure => "secure",
        }
    }
}

/// The fixed rendering setup every conversion uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderProfile {
    pub source_highlighter: String,
    pub link_css: bool,
    pub safe_mode: SafeMode,
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self {
            source_highlighter: "highlight.js".to_string(),
            link_css: true,
            safe_mode: SafeMode::Unsafe,
        }
    }
}

impl RenderProfile {
    pub const BACKEND: &'static str = "html5";
    pub const DOCTYPE: &'static str = "embedded";

    /// Attributes describing this profile, visible to the document like any other attribute.
    pub fn intrinsic_attributes(&self) -> Attributes {
        let mut x = Attributes::new();
        x.insert("backend", Self::BACKEND);
        x.insert("doctype", Self::DOCTYPE);
        x.insert("source-highlighter", self.source_highlighter.as_str());
        x.insert("safe-mode-name", self.safe_mode.name());
        if self.link_css {
            x.insert("linkcss", "");
        }
        x
    }

    /// Engine options: GFM plus frontmatter, so the header never shows up in the output.
    pub fn engine_options(&self) -> Options {
        let trusted = self.safe_mode == SafeMode::Unsafe;

        Options {
            parse: ParseOptions {
                constructs: Constructs {
                    frontmatter: true,
                    ..Constructs::gfm()
                },
                ..ParseOptions::gfm()
            },
            compile: CompileOptions {
                allow_dangerous_html: trusted,
                allow_dangerous_protocol: trusted,
                ..CompileOptions::gfm()
            },
        }
    }
}
