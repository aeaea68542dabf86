use std::collections::BTreeMap;
use std::time::Duration;

use bubble::{
    AutoplayPolicy, BubbleError, ListenerId, MediaElement, MediaEvent, MediaEventKind,
    PlayTrigger, Result, VideoDescriptor, VideoId,
};

/// Length of every simulated clip.
pub const CLIP_DURATION: Duration = Duration::from_secs(30);

/// Media element that simulates a looping video on a wall clock.
///
/// No frames are decoded. Position advances while playing; the duration is
/// reported only after the first tick following a load, the way a real element
/// only knows it once metadata has arrived.
#[derive(Debug)]
pub struct ClockElement {
    policy: AutoplayPolicy,
    duration: Duration,
    source: Option<VideoId>,
    position: Duration,
    metadata_loaded: bool,
    playing: bool,
    muted: bool,
    listeners: BTreeMap<ListenerId, MediaEventKind>,
    next_listener: ListenerId,
    pending: Vec<MediaEvent>,
}

impl ClockElement {
    pub fn new(policy: AutoplayPolicy, duration: Duration) -> Self {
        Self {
            policy,
            duration,
            source: None,
            position: Duration::ZERO,
            metadata_loaded: false,
            playing: false,
            muted: false,
            listeners: BTreeMap::new(),
            next_listener: 0,
            pending: Vec::new(),
        }
    }

    /// Advances playback by `elapsed` and returns the events to deliver.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(ListenerId, MediaEvent)> {
        if self.playing && self.source.is_some() {
            let duration = self.duration;
            if self.metadata_loaded {
                self.position += elapsed;
                if !duration.is_zero() && self.position >= duration {
                    self.position = Duration::from_nanos(
                        (self.position.as_nanos() % duration.as_nanos()) as u64,
                    );
                }
            }
            let reported = self.metadata_loaded.then(|| duration.as_secs_f64());
            self.metadata_loaded = true;
            self.pending.push(MediaEvent::TimeUpdate {
                current_time: self.position.as_secs_f64(),
                duration: reported,
            });
        }
        self.drain_events()
    }

    /// Returns queued play/pause events addressed to the current listeners.
    pub fn drain_events(&mut self) -> Vec<(ListenerId, MediaEvent)> {
        let pending = std::mem::take(&mut self.pending);
        pending
            .into_iter()
            .flat_map(|event| {
                self.listeners
                    .iter()
                    .filter(move |(_, kind)| **kind == event.kind())
                    .map(move |(id, _)| (*id, event))
            })
            .collect()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
impl ClockElement {
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn position(&self) -> Duration {
        self.position
    }
}

impl MediaElement for ClockElement {
    fn load(&mut self, video: &VideoDescriptor) {
        self.source = Some(video.id);
        self.position = Duration::ZERO;
        self.metadata_loaded = false;
        if self.playing {
            self.playing = false;
            self.pending.push(MediaEvent::Pause);
        }
    }

    fn play(&mut self, trigger: PlayTrigger) -> Result<()> {
        if !self.policy.permits(trigger, self.muted) {
            return Err(BubbleError::PlaybackRejected {
                reason: format!("{:?} policy refused {:?} playback", self.policy, trigger),
            });
        }
        if !self.playing {
            self.playing = true;
            self.pending.push(MediaEvent::Play);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.pending.push(MediaEvent::Pause);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn add_listener(&mut self, kind: MediaEventKind) -> ListenerId {
        self.next_listener += 1;
        self.listeners.insert(self.next_listener, kind);
        self.next_listener
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}
