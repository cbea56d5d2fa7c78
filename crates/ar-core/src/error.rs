use thiserror::Error;

/// Why an asset could not be turned into a `LoadedAsset`.
///
/// Every variant is terminal for the attempt: the session logs it and keeps
/// whatever asset was displayed before.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fetch of {url} failed: {reason}")]
    Fetch { url: String, reason: String },
    #[error("fetch of {url} returned HTTP {status}")]
    Http { url: String, status: u16 },
    #[error("glTF parse error: {0}")]
    Parse(#[from] gltf::Error),
    #[error("malformed data URI: {0}")]
    DataUri(String),
    #[error("buffer {0} has no data")]
    MissingBuffer(usize),
    #[error("buffer view {0} is out of range")]
    MissingView(usize),
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("asset contains no triangle geometry")]
    NoGeometry,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no model at catalog index {0}")]
    UnknownIndex(usize),
    #[error("no model named {0:?}")]
    UnknownName(String),
}
