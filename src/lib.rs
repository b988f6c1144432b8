//! Convert markdown documents to embeddable HTML fragments.
//!
//! The conversion itself is done by the [`markdown`] crate; this crate reads the
//! document from a file or URL, resolves its attributes and includes, and
//! writes the rendered fragment.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use xp_doc2html::Attributes;
//! use xp_doc2html::Converter;
//! use xp_doc2html::DefaultAttributes;
//! use xp_doc2html::Release;
//!
//! # fn main() -> Result<(), xp_doc2html::Error> {
//! let defaults = DefaultAttributes::from_release(&Release::new("26.1.3"));
//! let converter = Converter::new("site", defaults)?;
//!
//! converter.convert_file(
//!     &Attributes::new(),
//!     Path::new("site/guide.md"),
//!     Path::new("target/web"),
//!     "guide.html",
//! )?;
//!
//! converter.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod attributes;
pub mod converter;
pub mod error;
pub mod release;
pub mod render;
pub mod source;

pub use attributes::Attributes;
pub use converter::Converter;
pub use error::Error;
pub use error::Result;
pub use release::DefaultAttributes;
pub use release::Release;
pub use render::profile::RenderProfile;
pub use render::profile::SafeMode;
pub use source::Source;
