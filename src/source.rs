use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use reqwest::blocking::Client;
use reqwest::Url;

use crate::Error;

/// Where a document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(Url),
}

impl Source {
    /// Read the whole document as UTF-8 text.
    pub(crate) fn read_to_string(&self, client: &Client) -> Result<String, Error> {
        match self {
            Source::File(path) => fs::read_to_string(path).map_err(|e| Error::io(path, e)),
            Source::Url(url) => {
                let fetch_err = |source| Error::Fetch {
                    url: url.to_string(),
                    source,
                };

                let resp = client
                    .get(url.clone())
                    .send()
                    .and_then(|r| r.error_for_status())
                    .map_err(fetch_err)?;

                resp.text().map_err(fetch_err)
            }
        }
    }

    /// Directory relative includes are resolved against.
    ///
    /// A file's own directory, or `root` for remote documents.
    pub fn base_dir(&self, root: &Path) -> PathBuf {
        match self {
            Source::File(path) => match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            },
            Source::Url(_) => root.to_path_buf(),
        }
    }

    /// File name without extension, used to name the output when none is given.
    pub fn stem(&self) -> Option<String> {
        match self {
            Source::File(path) => path.file_stem().map(|s| s.to_string_lossy().into_owned()),
            Source::Url(url) => url
                .path_segments()
                .and_then(|mut s| s.next_back())
                .filter(|s| !s.is_empty())
                .map(|s| match s.rsplit_once('.') {
                    Some((stem, _)) if !stem.is_empty() => stem.to_string(),
                    _ => s.to_string(),
                }),
        }
    }
}

impl FromStr for Source {
    type Err = std::convert::Infallible;

    /// `http://` and `https://` URLs are remote sources, anything else is a path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(url) = Url::parse(s) {
            if url.scheme() == "http" || url.scheme() == "https" {
                return Ok(Source::Url(url));
            }
        }

        Ok(Source::File(PathBuf::from(s)))
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::File(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::File(path.to_path_buf())
    }
}

impl From<Url> for Source {
    fn from(url: Url) -> Self {
        Source::Url(url)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{}", url),
        }
    }
}
