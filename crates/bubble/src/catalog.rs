use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BubbleError, Result};

/// Identifier of one catalog entry.
pub type VideoId = u32;

/// One playable video offered by the bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDescriptor {
    pub id: VideoId,
    pub source: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl VideoDescriptor {
    pub fn new(id: VideoId, source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            source: source.into(),
            name: name.into(),
            placeholder: None,
        }
    }

    /// Sets the still image shown while the bubble is collapsed.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Ordered, validated list of videos. The first entry plays on mount.
///
/// # Example
/// ```
/// use bubble::{Catalog, VideoDescriptor};
///
/// let catalog = Catalog::new(vec![
///     VideoDescriptor::new(1, "videos/intro.mp4", "Intro"),
///     VideoDescriptor::new(2, "videos/outro.mp4", "Outro"),
/// ])
/// .expect("valid catalog");
///
/// assert_eq!(catalog.first().id, 1);
/// assert!(catalog.get(2).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    videos: Vec<VideoDescriptor>,
}

impl Catalog {
    /// Builds a catalog, rejecting empty lists and duplicate ids.
    pub fn new(videos: Vec<VideoDescriptor>) -> Result<Self> {
        if videos.is_empty() {
            return Err(BubbleError::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(videos.len());
        for video in &videos {
            if !seen.insert(video.id) {
                return Err(BubbleError::DuplicateVideoId { id: video.id });
            }
        }

        Ok(Self { videos })
    }

    /// Loads a catalog from a JSON array of descriptors.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| BubbleError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let videos: Vec<VideoDescriptor> =
            serde_json::from_str(&raw).map_err(|source| BubbleError::CatalogSerialization {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(videos)
    }

    /// Stock catalog of the primary page.
    pub fn primary() -> Self {
        Self {
            videos: vec![
                VideoDescriptor::new(1, "videos/first.mp4", "First Video of the Day"),
                VideoDescriptor::new(2, "videos/second.mp4", "Why You Shouldn't Play With Fire"),
                VideoDescriptor::new(3, "videos/third.mp4", "Smoke and Mirrors"),
            ],
        }
    }

    /// Stock catalog of the secondary page, with collapsed-state thumbnails.
    pub fn secondary() -> Self {
        Self {
            videos: vec![
                VideoDescriptor::new(1, "videos/first.mp4", "Big Buck Bunny")
                    .with_placeholder("images/placeholder.png"),
                VideoDescriptor::new(2, "videos/second.mp4", "Elephant's Dream")
                    .with_placeholder("images/placeholder.png"),
                VideoDescriptor::new(3, "videos/third.mp4", "For Bigger Blazes")
                    .with_placeholder("images/placeholder.png"),
            ],
        }
    }

    /// Video shown when the player mounts.
    pub fn first(&self) -> &VideoDescriptor {
        &self.videos[0]
    }

    pub fn get(&self, id: VideoId) -> Option<&VideoDescriptor> {
        self.videos.iter().find(|video| video.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VideoDescriptor> {
        self.videos.iter()
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}
