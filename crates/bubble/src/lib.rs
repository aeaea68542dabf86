//! UI-agnostic core of the floating bubble video player.

pub mod catalog;
pub mod config;
pub mod driver;
pub mod embed;
pub mod error;
pub mod layout;
pub mod media;
pub mod player;
pub mod progress;

pub use catalog::{Catalog, VideoDescriptor, VideoId};
pub use config::{AppConfig, AutoplayTrigger, CollapsedSurface, PageVariant, PlayerConfig};
pub use driver::BubblePlayer;
pub use embed::HostedEmbed;
pub use error::{BubbleError, Result};
pub use layout::{BubbleLayout, ControlsPlacement, Corner, SurfaceSize, SwitcherLabels};
pub use media::{
    AutoplayPolicy, ListenerId, ListenerSet, MediaElement, MediaEvent, MediaEventKind,
    PlayTrigger,
};
pub use player::{
    Effect, Input, Intent, Latch, PlayFlag, PlayOrigin, PlayerSnapshot, PlayerState,
};
pub use progress::progress_percent;
