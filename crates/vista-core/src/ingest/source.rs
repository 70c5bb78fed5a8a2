use std::fmt;
use std::fs::File;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use memmap2::Mmap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VistaError};

const OCTET_STREAM: &str = "application/octet-stream";

/// Where an image comes from.
#[derive(Clone, Debug)]
pub enum ImageSource {
    /// Local file; MIME type from the extension, sniffed if unknown.
    File(PathBuf),
    /// Plain GET; MIME type from the `Content-Type` header.
    Url(String),
    /// Bytes already in memory with a declared MIME type (drag-and-drop,
    /// clipboard, tests). Reported as [`SourceKind::File`].
    Memory {
        name: Option<String>,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl ImageSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Url(_) => SourceKind::Url,
            Self::File(_) | Self::Memory { .. } => SourceKind::File,
        }
    }

    /// Interpret a command-line style argument: `http://` / `https://`
    /// prefixes are URLs, anything else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            Self::Url(arg.to_string())
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
            Self::Memory { name, .. } => write!(f, "{}", name.as_deref().unwrap_or("<memory>")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    File,
    Url,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "File"),
            Self::Url => write!(f, "URL"),
        }
    }
}

/// The accepted input types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMime {
    Jpeg,
    Png,
    Webp,
}

impl ImageMime {
    pub const ALL: [Self; 3] = [Self::Jpeg, Self::Png, Self::Webp];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }

    /// Exact match on the MIME essence (parameters and case are ignored).
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime_essence(mime);
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(&essence))
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Webp => ImageFormat::WebP,
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip `; charset=...` style parameters and surrounding whitespace.
fn mime_essence(mime: &str) -> String {
    mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase()
}

/// MIME type guessed from the leading bytes, if the format is recognised.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" | "jpe" | "jfif" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => ImageFormat::from_extension(&ext).map(|f| f.to_mime_type()),
    }
}

/// Raw source bytes: memory-mapped for files, owned otherwise.
pub enum SourceBytes {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for SourceBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => &mmap[..],
            Self::Owned(vec) => vec.as_slice(),
        }
    }
}

impl SourceBytes {
    fn map_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Self::Owned(Vec::new()));
        }
        // The mapping is read-only and dropped once decoding finishes.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self::Mapped(mmap))
    }
}

/// Response of a [`Fetcher`].
#[derive(Clone, Debug)]
pub struct FetchedBlob {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// HTTP GET capability used for URL sources.
pub trait Fetcher: Send + Sync {
    /// Transport-level failures are returned as `FetchFailed`; HTTP status
    /// codes are returned in the blob and checked by the caller.
    fn fetch(&self, url: &str) -> Result<FetchedBlob>;
}

/// Fetcher that refuses every URL, used when no HTTP client is compiled in.
pub struct NoFetcher;

impl Fetcher for NoFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedBlob> {
        Err(VistaError::FetchFailed {
            url: url.to_string(),
            reason: "URL loading is not available in this build".into(),
        })
    }
}

#[cfg(feature = "http")]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http")]
impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedBlob> {
        let fetch_failed = |e: reqwest::Error| VistaError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        };
        let response = self.client.get(url).send().map_err(fetch_failed)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().map_err(fetch_failed)?.to_vec();
        Ok(FetchedBlob {
            status,
            content_type,
            bytes,
        })
    }
}

/// The default fetcher for this build.
pub fn default_fetcher() -> Box<dyn Fetcher> {
    #[cfg(feature = "http")]
    {
        Box::new(HttpFetcher::new())
    }
    #[cfg(not(feature = "http"))]
    {
        Box::new(NoFetcher)
    }
}

/// A source after its bytes have been obtained.
pub struct ResolvedSource {
    pub kind: SourceKind,
    pub name: Option<String>,
    /// As declared by the source; may be a type we do not support.
    pub declared_mime: String,
    pub bytes: SourceBytes,
}

/// Obtain the bytes and declared MIME type of a source.
pub fn resolve(source: ImageSource, fetcher: &dyn Fetcher) -> Result<ResolvedSource> {
    match source {
        ImageSource::File(path) => {
            let bytes = SourceBytes::map_file(&path)?;
            let declared_mime = mime_from_extension(&path)
                .or_else(|| sniff_mime(&bytes))
                .unwrap_or(OCTET_STREAM)
                .to_string();
            Ok(ResolvedSource {
                kind: SourceKind::File,
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned()),
                declared_mime,
                bytes,
            })
        }
        ImageSource::Url(url) => {
            let blob = fetcher.fetch(&url)?;
            if !(200..300).contains(&blob.status) {
                return Err(VistaError::FetchFailed {
                    url,
                    reason: format!("server responded with HTTP {}", blob.status),
                });
            }
            let declared_mime = match blob.content_type.as_deref().map(mime_essence) {
                Some(ct) if !ct.is_empty() && ct != OCTET_STREAM => ct,
                _ => sniff_mime(&blob.bytes).unwrap_or(OCTET_STREAM).to_string(),
            };
            Ok(ResolvedSource {
                kind: SourceKind::Url,
                name: url_file_name(&url),
                declared_mime,
                bytes: SourceBytes::Owned(blob.bytes),
            })
        }
        ImageSource::Memory { name, mime, bytes } => Ok(ResolvedSource {
            kind: SourceKind::File,
            name,
            declared_mime: mime,
            bytes: SourceBytes::Owned(bytes),
        }),
    }
}

/// Last non-empty path segment of a URL, without query or fragment.
fn url_file_name(url: &str) -> Option<String> {
    let without_query = url.split(['?', '#']).next()?;
    let after_scheme = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);
    let (_, path) = after_scheme.split_once('/')?;
    path.rsplit('/')
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}
