pub(crate) mod fence;
pub mod header;
pub mod include;
pub mod profile;
pub mod with_markdown;
