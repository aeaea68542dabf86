use tracing::{debug, info, warn};

use crate::catalog::{Catalog, VideoDescriptor, VideoId};
use crate::config::{AutoplayTrigger, PlayerConfig};
use crate::error::{BubbleError, Result};
use crate::media::{MediaEvent, PlayTrigger};
use crate::progress::progress_percent;

/// Who wrote the current value of a [`PlayFlag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOrigin {
    Initial,
    /// Optimistic write from a user intent.
    Intent,
    /// Observed from the element (play/pause event or settled play request).
    Element,
}

/// `is_playing` with two writers.
///
/// Element observations are authoritative and always overwrite the value.
/// Intent writes are provisional: they stand until the next observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayFlag {
    value: bool,
    origin: PlayOrigin,
}

impl PlayFlag {
    fn new() -> Self {
        Self {
            value: false,
            origin: PlayOrigin::Initial,
        }
    }

    fn intend(&mut self, value: bool) {
        self.value = value;
        self.origin = PlayOrigin::Intent;
    }

    fn observe(&mut self, value: bool) {
        self.value = value;
        self.origin = PlayOrigin::Element;
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn origin(&self) -> PlayOrigin {
        self.origin
    }

    /// True when the element has confirmed the current value.
    pub fn is_confirmed(&self) -> bool {
        self.origin == PlayOrigin::Element
    }
}

/// Flag that only moves from false to true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latch(bool);

impl Latch {
    /// Sets the latch. Returns true only on the call that flipped it.
    pub fn set(&mut self) -> bool {
        let flipped = !self.0;
        self.0 = true;
        flipped
    }

    pub fn is_set(&self) -> bool {
        self.0
    }
}

/// User intents accepted by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    TogglePlay,
    ToggleMute,
    ToggleExpand,
    /// Click on the bubble body; only expands a collapsed bubble.
    BubbleClicked,
    /// Explicit close button; only collapses an expanded bubble.
    Close,
    ChangeVideo(VideoId),
}

/// Inputs of the player reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Intent(Intent),
    Media(MediaEvent),
    PlayStarted { generation: u64 },
    PlayRejected { generation: u64, reason: String },
}

/// Commands for the media element and listener bookkeeping, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Load(VideoDescriptor),
    Play {
        trigger: PlayTrigger,
        generation: u64,
    },
    Pause,
    SetMuted(bool),
    AttachListeners {
        generation: u64,
    },
    DetachListeners,
}

/// Immutable view of the player consumed by the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub current_video: VideoDescriptor,
    pub is_playing: bool,
    pub is_muted: bool,
    pub is_expanded: bool,
    pub show_switcher: bool,
    pub progress_percent: f64,
}

/// Presentation and playback state of one bubble player.
#[derive(Debug, Clone)]
pub struct PlayerState {
    config: PlayerConfig,
    catalog: Catalog,
    current: VideoId,
    playing: PlayFlag,
    muted: bool,
    progress_percent: f64,
    expanded: bool,
    switcher: Latch,
    generation: u64,
    listeners_attached: bool,
    mounted: bool,
}

impl PlayerState {
    /// Creates an unmounted player over an injected catalog.
    pub fn new(config: PlayerConfig, catalog: Catalog) -> Result<Self> {
        config.validate(&catalog)?;
        Ok(Self {
            current: catalog.first().id,
            muted: config.start_muted,
            config,
            catalog,
            playing: PlayFlag::new(),
            progress_percent: 0.0,
            expanded: false,
            switcher: Latch::default(),
            generation: 0,
            listeners_attached: false,
            mounted: false,
        })
    }

    /// Resets every field to its default and acquires the first dependency state.
    pub fn mount(&mut self) -> Vec<Effect> {
        if self.mounted {
            return Vec::new();
        }

        self.current = self.catalog.first().id;
        self.playing = PlayFlag::new();
        self.muted = self.config.start_muted;
        self.progress_percent = 0.0;
        self.expanded = false;
        self.switcher = Latch::default();
        self.listeners_attached = false;
        self.mounted = true;

        let mut effects = vec![
            Effect::SetMuted(self.muted),
            Effect::Load(self.current_video().clone()),
        ];
        self.acquire_listeners(&mut effects, true, false);
        effects
    }

    /// Releases listeners; later inputs are ignored.
    pub fn unmount(&mut self) -> Vec<Effect> {
        if !self.mounted {
            return Vec::new();
        }

        let mut effects = Vec::new();
        self.release_listeners(&mut effects);
        self.mounted = false;
        debug!(generation = self.generation, "player unmounted");
        effects
    }

    /// Applies one input and returns the effects to run, in order.
    pub fn apply(&mut self, input: Input) -> Result<Vec<Effect>> {
        match input {
            Input::Intent(intent) => self.apply_intent(intent),
            Input::Media(event) => Ok(self.observe_media(event)),
            Input::PlayStarted { generation } => Ok(self.settle_play(generation, None)),
            Input::PlayRejected { generation, reason } => {
                Ok(self.settle_play(generation, Some(reason)))
            }
        }
    }

    pub fn apply_intent(&mut self, intent: Intent) -> Result<Vec<Effect>> {
        if !self.mounted {
            return Ok(Vec::new());
        }

        match intent {
            Intent::TogglePlay => Ok(self.toggle_play()),
            Intent::ToggleMute => Ok(self.toggle_mute()),
            Intent::ToggleExpand => Ok(self.toggle_expand()),
            Intent::BubbleClicked if !self.expanded => Ok(self.toggle_expand()),
            Intent::Close if self.expanded => Ok(self.toggle_expand()),
            Intent::BubbleClicked | Intent::Close => Ok(Vec::new()),
            Intent::ChangeVideo(id) => self.change_video(id),
        }
    }

    /// Applies an event observed on the element.
    pub fn observe_media(&mut self, event: MediaEvent) -> Vec<Effect> {
        if !self.mounted || !self.listeners_attached {
            debug!(?event, "media event without attached listeners ignored");
            return Vec::new();
        }

        match event {
            MediaEvent::TimeUpdate {
                current_time,
                duration,
            } => {
                self.progress_percent = progress_percent(current_time, duration);
                if self.config.is_lead(self.current)
                    && self.progress_percent >= self.config.switcher_threshold_percent
                    && self.switcher.set()
                {
                    info!(
                        video_id = self.current,
                        progress = self.progress_percent,
                        "switcher revealed"
                    );
                }
            }
            MediaEvent::Play => self.playing.observe(true),
            MediaEvent::Pause => self.playing.observe(false),
        }

        Vec::new()
    }

    /// Applies the outcome of a play request issued under `generation`.
    ///
    /// Outcomes from an earlier dependency state are dropped.
    pub fn settle_play(&mut self, generation: u64, rejection: Option<String>) -> Vec<Effect> {
        if !self.mounted || generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "stale play outcome ignored"
            );
            return Vec::new();
        }

        match rejection {
            None => self.playing.observe(true),
            Some(reason) => {
                warn!(generation, %reason, "play request rejected");
                self.playing.observe(false);
            }
        }

        Vec::new()
    }

    fn toggle_play(&mut self) -> Vec<Effect> {
        if !self.surface_live() {
            return Vec::new();
        }

        if self.playing.value() {
            self.playing.intend(false);
            vec![Effect::Pause]
        } else {
            self.playing.intend(true);
            vec![Effect::Play {
                trigger: PlayTrigger::UserGesture,
                generation: self.generation,
            }]
        }
    }

    fn toggle_mute(&mut self) -> Vec<Effect> {
        if !self.surface_live() {
            return Vec::new();
        }

        self.muted = !self.muted;
        vec![Effect::SetMuted(self.muted)]
    }

    fn toggle_expand(&mut self) -> Vec<Effect> {
        self.expanded = !self.expanded;
        info!(expanded = self.expanded, "bubble expansion toggled");

        let mut effects = Vec::new();
        let coupled = self.config.couple_expansion_to_playback;
        if coupled && !self.expanded {
            self.playing.intend(false);
            effects.push(Effect::Pause);
        }

        self.release_listeners(&mut effects);
        self.acquire_listeners(&mut effects, false, coupled && self.expanded);

        if coupled && self.expanded {
            self.playing.intend(true);
            effects.push(Effect::Play {
                trigger: PlayTrigger::UserGesture,
                generation: self.generation,
            });
        }

        effects
    }

    fn change_video(&mut self, id: VideoId) -> Result<Vec<Effect>> {
        let video = self
            .catalog
            .get(id)
            .ok_or(BubbleError::UnknownVideo { id })?
            .clone();
        let reload = video.id != self.current;

        self.current = video.id;
        self.progress_percent = 0.0;
        self.playing.intend(true);
        if !self.config.is_lead(video.id) {
            self.switcher.set();
        }
        info!(video_id = video.id, name = %video.name, reload, "video changed");

        let mut effects = Vec::new();
        if reload {
            self.release_listeners(&mut effects);
            effects.push(Effect::Load(video));
            self.acquire_listeners(&mut effects, true, false);
        }
        Ok(effects)
    }

    fn release_listeners(&mut self, effects: &mut Vec<Effect>) {
        if self.listeners_attached {
            effects.push(Effect::DetachListeners);
            self.listeners_attached = false;
        }
    }

    /// Enters a new dependency state. Listeners attach only to a live surface.
    fn acquire_listeners(
        &mut self,
        effects: &mut Vec<Effect>,
        video_changed: bool,
        play_already_requested: bool,
    ) {
        debug_assert!(!self.listeners_attached);
        self.generation += 1;
        if !self.surface_live() {
            return;
        }

        effects.push(Effect::AttachListeners {
            generation: self.generation,
        });
        self.listeners_attached = true;

        let autoplay = match self.config.autoplay {
            AutoplayTrigger::OnVideoChange => video_changed,
            AutoplayTrigger::WhenExpanded => self.expanded,
        };
        if autoplay && !play_already_requested {
            effects.push(Effect::Play {
                trigger: PlayTrigger::Autoplay,
                generation: self.generation,
            });
        }
    }

    fn surface_live(&self) -> bool {
        self.config.surface_live(self.expanded)
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_video: self.current_video().clone(),
            is_playing: self.is_playing(),
            is_muted: self.muted,
            is_expanded: self.expanded,
            show_switcher: self.switcher.is_set(),
            progress_percent: self.progress_percent,
        }
    }

    pub fn current_video(&self) -> &VideoDescriptor {
        self.catalog
            .get(self.current)
            .unwrap_or_else(|| self.catalog.first())
    }

    pub fn playing(&self) -> PlayFlag {
        self.playing
    }

    pub fn is_playing(&self) -> bool {
        self.playing.value()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn show_switcher(&self) -> bool {
        self.switcher.is_set()
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn listeners_attached(&self) -> bool {
        self.listeners_attached
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }
}
