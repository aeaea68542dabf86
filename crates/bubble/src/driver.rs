use std::collections::VecDeque;

use tracing::debug;

use crate::catalog::{Catalog, VideoId};
use crate::config::PlayerConfig;
use crate::error::Result;
use crate::media::{ListenerId, ListenerSet, MediaElement, MediaEvent};
use crate::player::{Effect, Intent, PlayerSnapshot, PlayerState};

/// Bubble player bound to one media element.
///
/// Owns the element and the active [`ListenerSet`]. Listeners are released
/// before any new set is attached and again when the player is dropped, so an
/// element never keeps a subscription for a stale dependency state.
///
/// # Example
/// ```ignore
/// use bubble::{BubblePlayer, Catalog, PlayerConfig};
///
/// let mut player = BubblePlayer::mount(PlayerConfig::primary(), Catalog::primary(), element)?;
/// player.toggle_expand()?;
/// player.change_video(2)?;
/// ```
#[derive(Debug)]
pub struct BubblePlayer<M: MediaElement> {
    state: PlayerState,
    element: M,
    listeners: Option<ListenerSet>,
}

impl<M: MediaElement> BubblePlayer<M> {
    /// Creates and mounts a player, running the mount effects on `element`.
    pub fn mount(config: PlayerConfig, catalog: Catalog, element: M) -> Result<Self> {
        let mut state = PlayerState::new(config, catalog)?;
        let effects = state.mount();
        let mut player = Self {
            state,
            element,
            listeners: None,
        };
        player.run(effects);
        Ok(player)
    }

    /// Applies one user intent.
    pub fn intent(&mut self, intent: Intent) -> Result<()> {
        let effects = self.state.apply_intent(intent)?;
        self.run(effects);
        Ok(())
    }

    pub fn toggle_play(&mut self) -> Result<()> {
        self.intent(Intent::TogglePlay)
    }

    pub fn toggle_mute(&mut self) -> Result<()> {
        self.intent(Intent::ToggleMute)
    }

    pub fn toggle_expand(&mut self) -> Result<()> {
        self.intent(Intent::ToggleExpand)
    }

    pub fn change_video(&mut self, id: VideoId) -> Result<()> {
        self.intent(Intent::ChangeVideo(id))
    }

    /// Delivers an element event fired for listener `listener`.
    ///
    /// Events for listeners that are not part of the active set are dropped.
    pub fn handle_media_event(&mut self, listener: ListenerId, event: MediaEvent) {
        let routed = self
            .listeners
            .as_ref()
            .is_some_and(|set| set.routes(listener, &event));
        if !routed {
            debug!(listener, ?event, "event from detached listener dropped");
            return;
        }

        let effects = self.state.observe_media(event);
        self.run(effects);
    }

    /// Lets the host drive the element and delivers the events it reports.
    pub fn pump<F>(&mut self, drive: F)
    where
        F: FnOnce(&mut M) -> Vec<(ListenerId, MediaEvent)>,
    {
        for (listener, event) in drive(&mut self.element) {
            self.handle_media_event(listener, event);
        }
    }

    /// Unmounts the player, detaching every listener.
    pub fn unmount(self) {
        drop(self);
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.state.snapshot()
    }

    pub fn element(&self) -> &M {
        &self.element
    }

    fn run(&mut self, effects: Vec<Effect>) {
        let mut queue = VecDeque::from(effects);
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Load(video) => self.element.load(&video),
                Effect::Play {
                    trigger,
                    generation,
                } => {
                    let follow_up = match self.element.play(trigger) {
                        Ok(()) => self.state.settle_play(generation, None),
                        Err(error) => self.state.settle_play(generation, Some(error.to_string())),
                    };
                    queue.extend(follow_up);
                }
                Effect::Pause => self.element.pause(),
                Effect::SetMuted(muted) => self.element.set_muted(muted),
                Effect::AttachListeners { generation } => {
                    self.detach();
                    self.listeners = Some(ListenerSet::acquire(&mut self.element, generation));
                }
                Effect::DetachListeners => self.detach(),
            }
        }
    }

    fn detach(&mut self) {
        if let Some(set) = self.listeners.take() {
            set.release(&mut self.element);
        }
    }
}

impl<M: MediaElement> Drop for BubblePlayer<M> {
    fn drop(&mut self) {
        let effects = self.state.unmount();
        self.run(effects);
        self.detach();
    }
}
