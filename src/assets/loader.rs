use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::{
    AdframeError, AdframeResult,
    assets::decode::{decode_asset, decode_data_url},
    assets::store::{PreparedAsset, normalize_rel_path},
};

/// Reference to a loadable image.
///
/// Template layers are referenced by path, uploads usually arrive as encoded bytes. The
/// compositor treats both the same way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Path or URL reference resolved by the [`ImageLoader`].
    Path(String),
    /// In-memory encoded image (PNG, JPEG, SVG, ...).
    Encoded(Arc<[u8]>),
}

impl ImageSource {
    /// Path reference.
    pub fn path(reference: impl Into<String>) -> Self {
        Self::Path(reference.into())
    }

    /// In-memory encoded bytes.
    pub fn encoded(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Encoded(bytes.into())
    }

    /// Interpret a reference string; `data:` URLs become [`ImageSource::Encoded`].
    pub fn parse(reference: &str) -> AdframeResult<Self> {
        if reference.starts_with("data:") {
            return Ok(Self::encoded(decode_data_url(reference)?));
        }
        if reference.trim().is_empty() {
            return Err(AdframeError::validation("image reference must be non-empty"));
        }
        Ok(Self::path(reference))
    }

    /// Short human-readable description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Path(p) => p.clone(),
            Self::Encoded(bytes) => format!("<{} encoded bytes>", bytes.len()),
        }
    }
}

/// Asynchronous image resolution.
///
/// The compositor awaits one load at a time, so implementations may complete in any amount
/// of time without affecting layer order.
///
/// The built-in loaders read local files and in-memory bytes only. Templates whose layer
/// references are `http(s)` URLs need a caller-supplied loader that performs the fetch; with
/// [`FsImageLoader`] such layers are reported as omitted.
pub trait ImageLoader {
    /// Fetch and decode `source`.
    fn load(&self, source: &ImageSource) -> impl Future<Output = AdframeResult<PreparedAsset>>;
}

/// Loads path references from a directory on disk.
///
/// `http://`, `https://` and protocol-relative `//` references are rejected with a
/// [`AdframeError::Decode`] error.
///
/// Reads are synchronous; the returned future is already complete.
#[derive(Clone, Debug)]
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    /// Resolve references relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory for path references.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_now(&self, source: &ImageSource) -> AdframeResult<PreparedAsset> {
        match source {
            ImageSource::Encoded(bytes) => decode_asset(bytes),
            ImageSource::Path(reference) => {
                if reference.starts_with("data:") {
                    return decode_asset(&decode_data_url(reference)?);
                }
                if is_remote(reference) {
                    return Err(AdframeError::decode(format!(
                        "remote image reference '{reference}' is not supported"
                    )));
                }
                let rel = normalize_rel_path(reference)?;
                let path = self.root.join(&rel);
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read image '{}'", path.display()))?;
                decode_asset(&bytes)
            }
        }
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&self, source: &ImageSource) -> impl Future<Output = AdframeResult<PreparedAsset>> {
        std::future::ready(self.load_now(source))
    }
}

/// Serves path references from an in-memory table of encoded images.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageLoader {
    entries: BTreeMap<String, Arc<[u8]>>,
}

impl MemoryImageLoader {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded bytes under a path reference.
    pub fn insert(
        &mut self,
        reference: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> AdframeResult<&mut Self> {
        self.entries
            .insert(normalize_rel_path(reference)?, bytes.into());
        Ok(self)
    }

    fn load_now(&self, source: &ImageSource) -> AdframeResult<PreparedAsset> {
        match source {
            ImageSource::Encoded(bytes) => decode_asset(bytes),
            ImageSource::Path(reference) => {
                let rel = normalize_rel_path(reference)?;
                let bytes = self.entries.get(&rel).ok_or_else(|| {
                    AdframeError::decode(format!("no image registered for '{reference}'"))
                })?;
                decode_asset(bytes)
            }
        }
    }
}

impl ImageLoader for MemoryImageLoader {
    fn load(&self, source: &ImageSource) -> impl Future<Output = AdframeResult<PreparedAsset>> {
        std::future::ready(self.load_now(source))
    }
}

fn is_remote(reference: &str) -> bool {
    let lower = reference.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
