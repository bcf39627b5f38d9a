use std::fmt;

use thiserror::Error;

/// Raw buffer did not match the claimed dimensions.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResourceError {
    #[error("{width}x{height} RGBA buffer does not fit in memory")]
    DimensionsOverflow { width: u32, height: u32 },

    #[error("RGBA buffer for {width}x{height} must hold {expected} bytes, got {actual}")]
    BufferMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Failure reported by an image loader.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("invalid image URL `{0}`")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("server answered {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("unable to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("image at {url} is larger than {limit} bytes")]
    TooLarge { url: String, limit: u64 },

    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("pixel access denied for {url}: host does not allow origin {origin}")]
    PixelAccessDenied { url: String, origin: String },
}

impl LoadError {
    pub fn is_cross_origin(&self) -> bool {
        matches!(self, LoadError::PixelAccessDenied { .. })
    }
}

/// Terminal failure class of an analysis request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInput,
    LoadFailure,
    CrossOriginRestricted,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingInput => "missing input",
            ErrorKind::LoadFailure => "load failure",
            ErrorKind::CrossOriginRestricted => "cross-origin restricted",
        };
        f.write_str(name)
    }
}

/// Error surfaced to the caller of an analysis. The `Display` text is meant
/// for the person who submitted the URL.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Please paste an image URL first.")]
    MissingInput,

    #[error("Failed to load image. Check the URL. ({source})")]
    LoadFailure {
        #[source]
        source: LoadError,
    },

    #[error(
        "Could not analyze this image: the host blocks reading its pixels (CORS restriction). \
         Try an image hosted somewhere that allows cross-origin access."
    )]
    CrossOriginRestricted {
        #[source]
        source: LoadError,
    },
}

impl AnalyzeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyzeError::MissingInput => ErrorKind::MissingInput,
            AnalyzeError::LoadFailure { .. } => ErrorKind::LoadFailure,
            AnalyzeError::CrossOriginRestricted { .. } => ErrorKind::CrossOriginRestricted,
        }
    }
}

impl From<LoadError> for AnalyzeError {
    fn from(source: LoadError) -> Self {
        if source.is_cross_origin() {
            AnalyzeError::CrossOriginRestricted { source }
        } else {
            AnalyzeError::LoadFailure { source }
        }
    }
}
