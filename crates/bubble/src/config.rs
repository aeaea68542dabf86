use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, VideoId};
use crate::embed::HostedEmbed;
use crate::error::{BubbleError, Result};
use crate::layout::BubbleLayout;
use crate::media::AutoplayPolicy;

pub const VARIANT_ENV: &str = "BUBBLE_VARIANT";
pub const CATALOG_ENV: &str = "BUBBLE_CATALOG";
pub const AUTOPLAY_POLICY_ENV: &str = "BUBBLE_AUTOPLAY_POLICY";

/// When the player asks the element to start on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoplayTrigger {
    /// On mount and after every video change, regardless of expansion.
    OnVideoChange,
    /// After any dependency change that leaves the bubble expanded.
    WhenExpanded,
}

/// What the collapsed bubble shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollapsedSurface {
    /// The video keeps running inside the circle; listeners stay attached.
    LiveVideo,
    /// A still thumbnail; the media surface only exists while expanded.
    Thumbnail,
}

/// Id of the video the switcher threshold is measured on in the stock pages.
pub const DEFAULT_LEAD_VIDEO_ID: VideoId = 1;

fn default_lead_video_id() -> VideoId {
    DEFAULT_LEAD_VIDEO_ID
}

/// Behavioural configuration of one bubble player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Video whose progress reveals the switcher. Switching to any other id
    /// reveals it immediately.
    #[serde(default = "default_lead_video_id")]
    pub lead_video_id: VideoId,
    pub couple_expansion_to_playback: bool,
    pub switcher_threshold_percent: f64,
    pub autoplay: AutoplayTrigger,
    pub collapsed_surface: CollapsedSurface,
    pub start_muted: bool,
    pub layout: BubbleLayout,
}

impl PlayerConfig {
    /// Decoupled expansion, 50% switcher threshold, live collapsed video.
    pub fn primary() -> Self {
        Self {
            lead_video_id: DEFAULT_LEAD_VIDEO_ID,
            couple_expansion_to_playback: false,
            switcher_threshold_percent: 50.0,
            autoplay: AutoplayTrigger::OnVideoChange,
            collapsed_surface: CollapsedSurface::LiveVideo,
            start_muted: true,
            layout: BubbleLayout::primary(),
        }
    }

    /// Expansion drives playback, 5% switcher threshold, thumbnail when collapsed.
    pub fn secondary() -> Self {
        Self {
            lead_video_id: DEFAULT_LEAD_VIDEO_ID,
            couple_expansion_to_playback: true,
            switcher_threshold_percent: 5.0,
            autoplay: AutoplayTrigger::WhenExpanded,
            collapsed_surface: CollapsedSurface::Thumbnail,
            start_muted: true,
            layout: BubbleLayout::secondary(),
        }
    }

    /// Checks the threshold range and that `catalog` contains the lead video.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        let value = self.switcher_threshold_percent;
        if !value.is_finite() || value <= 0.0 || value > 100.0 {
            return Err(BubbleError::InvalidThreshold { value });
        }
        if catalog.get(self.lead_video_id).is_none() {
            return Err(BubbleError::LeadVideoMissing {
                id: self.lead_video_id,
            });
        }
        Ok(())
    }

    pub fn is_lead(&self, id: VideoId) -> bool {
        id == self.lead_video_id
    }

    /// Whether the media surface exists in the given expansion state.
    pub fn surface_live(&self, expanded: bool) -> bool {
        expanded || self.collapsed_surface == CollapsedSurface::LiveVideo
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::primary()
    }
}

/// Page variant selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageVariant {
    #[default]
    Primary,
    Secondary,
    Hosted,
}

impl FromStr for PageVariant {
    type Err = BubbleError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "primary" | "v1" => Ok(Self::Primary),
            "secondary" | "v2" => Ok(Self::Secondary),
            "hosted" => Ok(Self::Hosted),
            _ => Err(BubbleError::InvalidVariant {
                value: value.to_owned(),
            }),
        }
    }
}

/// Startup configuration read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub variant: PageVariant,
    pub catalog_path: Option<PathBuf>,
    pub hosted: Option<HostedEmbed>,
    pub autoplay_policy: AutoplayPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let variant = match non_blank(lookup(VARIANT_ENV)) {
            Some(value) => value.parse()?,
            None => PageVariant::default(),
        };
        let autoplay_policy = match non_blank(lookup(AUTOPLAY_POLICY_ENV)) {
            Some(value) => value.parse()?,
            None => AutoplayPolicy::default(),
        };

        Ok(Self {
            variant,
            catalog_path: non_blank(lookup(CATALOG_ENV)).map(PathBuf::from),
            hosted: HostedEmbed::from_lookup(&lookup),
            autoplay_policy,
        })
    }

    /// Player configuration for the selected variant; `None` for the hosted page.
    pub fn player_config(&self) -> Option<PlayerConfig> {
        match self.variant {
            PageVariant::Primary => Some(PlayerConfig::primary()),
            PageVariant::Secondary => Some(PlayerConfig::secondary()),
            PageVariant::Hosted => None,
        }
    }

    /// Catalog from `BUBBLE_CATALOG` or the stock list of the variant.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_json_file(path),
            None if self.variant == PageVariant::Secondary => Ok(Catalog::secondary()),
            None => Ok(Catalog::primary()),
        }
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
