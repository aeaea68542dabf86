use std::str::FromStr;

use tracing::debug;

use crate::catalog::VideoDescriptor;
use crate::error::{BubbleError, Result};

/// Handle returned by [`MediaElement::add_listener`].
pub type ListenerId = u64;

/// Element events the player subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEventKind {
    TimeUpdate,
    Play,
    Pause,
}

impl MediaEventKind {
    pub const ALL: [Self; 3] = [Self::TimeUpdate, Self::Play, Self::Pause];
}

/// Event fired by a media element.
///
/// `duration` is `None` until the element knows the length of the media.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    TimeUpdate {
        current_time: f64,
        duration: Option<f64>,
    },
    Play,
    Pause,
}

impl MediaEvent {
    pub fn kind(&self) -> MediaEventKind {
        match self {
            Self::TimeUpdate { .. } => MediaEventKind::TimeUpdate,
            Self::Play => MediaEventKind::Play,
            Self::Pause => MediaEventKind::Pause,
        }
    }
}

/// Who asked the element to start playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayTrigger {
    UserGesture,
    Autoplay,
}

/// Platform rule deciding whether programmatic playback is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoplayPolicy {
    Allow,
    /// Autoplay only while muted, the common browser default.
    #[default]
    MutedOnly,
    Block,
}

impl AutoplayPolicy {
    pub fn permits(self, trigger: PlayTrigger, muted: bool) -> bool {
        match (trigger, self) {
            (PlayTrigger::UserGesture, _) | (PlayTrigger::Autoplay, Self::Allow) => true,
            (PlayTrigger::Autoplay, Self::MutedOnly) => muted,
            (PlayTrigger::Autoplay, Self::Block) => false,
        }
    }
}

impl FromStr for AutoplayPolicy {
    type Err = BubbleError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "muted-only" | "muted" => Ok(Self::MutedOnly),
            "block" => Ok(Self::Block),
            _ => Err(BubbleError::InvalidAutoplayPolicy {
                value: value.to_owned(),
            }),
        }
    }
}

/// Playback surface driven by the bubble player.
///
/// Implementations deliver events to the host, tagged with the listener id
/// they were registered under; the host forwards them to
/// [`crate::BubblePlayer::handle_media_event`].
pub trait MediaElement {
    /// Points the element at a new source and rewinds it.
    fn load(&mut self, video: &VideoDescriptor);

    /// Requests playback. May be refused by platform policy.
    fn play(&mut self, trigger: PlayTrigger) -> Result<()>;

    fn pause(&mut self);

    fn set_muted(&mut self, muted: bool);

    fn add_listener(&mut self, kind: MediaEventKind) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId);
}

/// The time-progress, play and pause listeners registered for one
/// dependency generation.
///
/// A set must be handed back through [`ListenerSet::release`] before the next
/// one is acquired.
#[derive(Debug, PartialEq, Eq)]
pub struct ListenerSet {
    generation: u64,
    listeners: [(MediaEventKind, ListenerId); 3],
}

impl ListenerSet {
    pub fn acquire<M>(element: &mut M, generation: u64) -> Self
    where
        M: MediaElement + ?Sized,
    {
        let listeners = MediaEventKind::ALL.map(|kind| (kind, element.add_listener(kind)));
        debug!(generation, ?listeners, "media listeners attached");
        Self {
            generation,
            listeners,
        }
    }

    pub fn release<M>(self, element: &mut M)
    where
        M: MediaElement + ?Sized,
    {
        for (_, id) in self.listeners {
            element.remove_listener(id);
        }
        debug!(generation = self.generation, "media listeners detached");
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true when `id` is the listener registered for the event's kind.
    pub fn routes(&self, id: ListenerId, event: &MediaEvent) -> bool {
        self.listeners
            .iter()
            .any(|(kind, registered)| *registered == id && *kind == event.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::{AutoplayPolicy, PlayTrigger};

    #[test]
    fn muted_only_policy_rejects_audible_autoplay() {
        let policy = AutoplayPolicy::MutedOnly;

        assert!(policy.permits(PlayTrigger::Autoplay, true));
        assert!(!policy.permits(PlayTrigger::Autoplay, false));
        assert!(policy.permits(PlayTrigger::UserGesture, false));
    }

    #[test]
    fn block_policy_still_allows_user_gestures() {
        assert!(!AutoplayPolicy::Block.permits(PlayTrigger::Autoplay, true));
        assert!(AutoplayPolicy::Block.permits(PlayTrigger::UserGesture, true));
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("allow".parse::<AutoplayPolicy>().ok(), Some(AutoplayPolicy::Allow));
        assert_eq!(
            "Muted-Only".parse::<AutoplayPolicy>().ok(),
            Some(AutoplayPolicy::MutedOnly)
        );
        assert!("sometimes".parse::<AutoplayPolicy>().is_err());
    }
}
