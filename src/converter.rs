use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use reqwest::blocking::Client;
use reqwest::Url;

use crate::render::header::Header;
use crate::render::header::DOCTITLE;
use crate::render::header::TITLE;
use crate::render::include::Includes;
use crate::render::profile::RenderProfile;
use crate::render::with_markdown::WithMarkdown;
use crate::Attributes;
use crate::DefaultAttributes;
use crate::Error;
use crate::Source;

/// Converts documents to embeddable HTML fragments.
///
/// A `Converter` owns the configured engine from construction until it is
/// dropped or [`shutdown`](Self::shutdown). Every call is synchronous and
/// blocks until the read, conversion and write complete. It is not meant to
/// be shared between threads: serialize calls or create one per thread.
pub struct Converter {
    /// Base directory for includes of documents that have no directory of their own, i.e. URLs.
    root_dir: PathBuf,
    defaults: DefaultAttributes,
    profile: RenderProfile,
    engine: WithMarkdown,
    client: Client,
}

impl Converter {
    /// Create a converter with the default [`RenderProfile`].
    pub fn new(root_dir: impl Into<PathBuf>, defaults: DefaultAttributes) -> Result<Self, Error> {
        Self::with_profile(root_dir, defaults, RenderProfile::default())
    }

    pub fn with_profile(
        root_dir: impl Into<PathBuf>,
        defaults: DefaultAttributes,
        profile: RenderProfile,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(concat!("xp-doc2html/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Client)?;

        let root_dir = root_dir.into();
        log::debug!("converter created, root: {}", root_dir.display());

        Ok(Self {
            root_dir,
            defaults,
            engine: WithMarkdown::new(&profile),
            profile,
            client,
        })
    }

    pub fn defaults(&self) -> &DefaultAttributes {
        &self.defaults
    }

    /// Replace the defaults. Conversions after this call see the new values.
    pub fn set_defaults(&mut self, defaults: DefaultAttributes) {
        self.defaults = defaults;
    }

    pub fn profile(&self) -> &RenderProfile {
        &self.profile
    }

    /// The attributes a conversion starts from, before the document header is applied.
    ///
    /// Caller overrides win over the defaults; the render profile wins over both.
    pub fn effective_attributes(&self, overrides: &Attributes) -> Attributes {
        let mut x = Attributes::merged(self.defaults.attributes(), overrides);
        x.merge(&self.profile.intrinsic_attributes());
        x
    }

    /// Convert `source` and write the fragment to `target_dir/output`.
    ///
    /// The output file is created or truncated. Nothing is written if the source
    /// cannot be read or converted.
    ///
    /// # Returns
    ///
    /// the attributes the document was rendered with
    pub fn convert(
        &self,
        overrides: &Attributes,
        source: &Source,
        target_dir: &Path,
        output: &str,
    ) -> Result<Attributes, Error> {
        let text = source.read_to_string(&self.client)?;
        let base_dir = source.base_dir(&self.root_dir);

        let mut api = self.effective_attributes(overrides);
        if let Source::File(_) = source {
            api.insert("docdir", base_dir.display().to_string());
        }

        let (html, attributes) = self.render_text(&text, &base_dir, &source.to_string(), api)?;

        let output_path = target_dir.join(output);
        Self::write_output(&output_path, &html)?;

        log::debug!(
            "converted {} to {} ({} bytes)",
            source,
            output_path.display(),
            html.len()
        );

        Ok(attributes)
    }

    pub fn convert_file(
        &self,
        overrides: &Attributes,
        path: &Path,
        target_dir: &Path,
        output: &str,
    ) -> Result<Attributes, Error> {
        self.convert(overrides, &Source::from(path), target_dir, output)
    }

    pub fn convert_url(
        &self,
        overrides: &Attributes,
        url: &Url,
        target_dir: &Path,
        output: &str,
    ) -> Result<Attributes, Error> {
        self.convert(overrides, &Source::from(url.clone()), target_dir, output)
    }

    /// Convert in-memory markup. Includes resolve against the root directory.
    pub fn render_str(&self, text: &str, overrides: &Attributes) -> Result<String, Error> {
        let api = self.effective_attributes(overrides);
        let (html, _) = self.render_text(text, &self.root_dir, "<stdin>", api)?;
        Ok(html)
    }

    /// Parse `source` without rendering it and return the attributes it declares.
    ///
    /// The result holds `backend`, the optional `overrides`, the header
    /// attributes and `doctitle` if the document has a title. Defaults are not
    /// applied.
    pub fn parse_attributes(
        &self,
        source: &Source,
        overrides: Option<&Attributes>,
    ) -> Result<Attributes, Error> {
        let text = source.read_to_string(&self.client)?;

        let mut api = Attributes::new();
        api.insert("backend", RenderProfile::BACKEND);
        if let Some(o) = overrides {
            api.merge(o);
        }

        let header = Header::from_root(&self.engine.load(&text)?)?;

        Ok(Self::apply_header(&api, header))
    }

    /// Release the engine.
    ///
    /// Takes the converter by value: calling it twice, or converting after it,
    /// does not compile. Dropping the converter has the same effect.
    pub fn shutdown(self) {
        log::debug!("converter shutdown");
    }

    fn render_text(
        &self,
        text: &str,
        base_dir: &Path,
        doc: &str,
        api: Attributes,
    ) -> Result<(String, Attributes), Error> {
        let includes = Includes {
            attributes: &api,
            safe_mode: self.profile.safe_mode,
        };
        let expanded = includes.expand(text, base_dir, doc);

        let header = Header::from_root(&self.engine.load(&expanded)?)?;

        let offset = if expanded.is_char_boundary(header.body_offset) {
            header.body_offset
        } else {
            0
        };

        let attributes = Self::apply_header(&api, header);

        let (head, body) = expanded.split_at(offset);
        let markup = format!("{}{}", head, attributes.substitute(body));

        let html = self.engine.render(&markup)?;

        Ok((html, attributes))
    }

    fn apply_header(api: &Attributes, header: Header) -> Attributes {
        let mut attributes = Attributes::resolve(api, &header.attributes);

        if !attributes.contains_key(DOCTITLE) {
            let title = attributes.get(TITLE).map(str::to_string).or(header.heading);
            if let Some(title) = title {
                attributes.insert(DOCTITLE, title);
            }
        }

        attributes
    }

    fn write_output(path: &Path, html: &str) -> Result<(), Error> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;

        let mut w = BufWriter::new(file);
        w.write_all(html.as_bytes()).map_err(|e| Error::io(path, e))?;
        w.flush().map_err(|e| Error::io(path, e))?;

        Ok(())
    }
}

impl Drop for Converter {
    fn drop(&mut self) {
        log::debug!("converter released, root: {}", self.root_dir.display());
    }
}
