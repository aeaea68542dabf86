use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Result type used by the bubble crate.
pub type Result<T> = std::result::Result<T, BubbleError>;

/// Errors produced by catalog loading, configuration and media elements.
#[derive(Debug)]
pub enum BubbleError {
    EmptyCatalog,
    DuplicateVideoId {
        id: u32,
    },
    UnknownVideo {
        id: u32,
    },
    LeadVideoMissing {
        id: u32,
    },
    InvalidThreshold {
        value: f64,
    },
    InvalidVariant {
        value: String,
    },
    InvalidAutoplayPolicy {
        value: String,
    },
    CatalogIo {
        path: PathBuf,
        source: std::io::Error,
    },
    CatalogSerialization {
        path: PathBuf,
        source: serde_json::Error,
    },
    PlaybackRejected {
        reason: String,
    },
}

impl Display for BubbleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "video catalog is empty"),
            Self::DuplicateVideoId { id } => write!(f, "duplicate video id in catalog: {id}"),
            Self::UnknownVideo { id } => write!(f, "video not found in catalog: {id}"),
            Self::LeadVideoMissing { id } => {
                write!(f, "lead video {id} is not part of the catalog")
            }
            Self::InvalidThreshold { value } => {
                write!(f, "switcher threshold must be in (0, 100]: {value}")
            }
            Self::InvalidVariant { value } => write!(f, "unknown page variant: {value}"),
            Self::InvalidAutoplayPolicy { value } => {
                write!(f, "unknown autoplay policy: {value}")
            }
            Self::CatalogIo { path, source } => {
                write!(f, "failed to read catalog: {} ({source})", path.display())
            }
            Self::CatalogSerialization { path, source } => {
                write!(
                    f,
                    "catalog deserialization failed at {} ({source})",
                    path.display()
                )
            }
            Self::PlaybackRejected { reason } => write!(f, "playback rejected: {reason}"),
        }
    }
}

impl std::error::Error for BubbleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CatalogIo { source, .. } => Some(source),
            Self::CatalogSerialization { source, .. } => Some(source),
            _ => None,
        }
    }
}
