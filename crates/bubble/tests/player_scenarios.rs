use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use bubble::{
    BubbleError, BubblePlayer, Catalog, Input, Intent, ListenerId, MediaElement, MediaEvent,
    MediaEventKind, PlayTrigger, PlayerConfig, PlayerState, Result, VideoDescriptor, VideoId,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(VideoId),
    Play(PlayTrigger),
    Pause,
    SetMuted(bool),
}

#[derive(Debug, Default)]
struct ElementLog {
    calls: Vec<Call>,
    listeners: BTreeMap<ListenerId, MediaEventKind>,
    removed: Vec<MediaEventKind>,
    next_id: ListenerId,
    muted: bool,
}

#[derive(Debug, Clone, Default)]
struct RecordingElement {
    log: Rc<RefCell<ElementLog>>,
    reject_autoplay: bool,
}

impl RecordingElement {
    fn listener_for(&self, kind: MediaEventKind) -> ListenerId {
        self.log
            .borrow()
            .listeners
            .iter()
            .find_map(|(id, registered)| (*registered == kind).then_some(*id))
            .expect("listener registered")
    }

    fn time_update(&self, current_time: f64) -> Vec<(ListenerId, MediaEvent)> {
        vec![(
            self.listener_for(MediaEventKind::TimeUpdate),
            MediaEvent::TimeUpdate {
                current_time,
                duration: Some(100.0),
            },
        )]
    }
}

impl MediaElement for RecordingElement {
    fn load(&mut self, video: &VideoDescriptor) {
        self.log.borrow_mut().calls.push(Call::Load(video.id));
    }

    fn play(&mut self, trigger: PlayTrigger) -> Result<()> {
        self.log.borrow_mut().calls.push(Call::Play(trigger));
        if self.reject_autoplay && trigger == PlayTrigger::Autoplay {
            return Err(BubbleError::PlaybackRejected {
                reason: String::from("user gesture required"),
            });
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.log.borrow_mut().calls.push(Call::Pause);
    }

    fn set_muted(&mut self, muted: bool) {
        let mut log = self.log.borrow_mut();
        log.muted = muted;
        log.calls.push(Call::SetMuted(muted));
    }

    fn add_listener(&mut self, kind: MediaEventKind) -> ListenerId {
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        let id = log.next_id;
        log.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        let mut log = self.log.borrow_mut();
        if let Some(kind) = log.listeners.remove(&id) {
            log.removed.push(kind);
        }
    }
}

fn mount(config: PlayerConfig) -> (BubblePlayer<RecordingElement>, Rc<RefCell<ElementLog>>) {
    let element = RecordingElement::default();
    let log = Rc::clone(&element.log);
    let player = BubblePlayer::mount(config, Catalog::primary(), element).expect("mount");
    (player, log)
}

#[test]
fn toggle_play_parity_without_element_events() {
    let mut state =
        PlayerState::new(PlayerConfig::primary(), Catalog::primary()).expect("valid state");
    let _ = state.mount();
    let initial = state.is_playing();

    for calls in 1..=7 {
        let _ = state
            .apply(Input::Intent(Intent::TogglePlay))
            .expect("toggle play");
        let expected = if calls % 2 == 1 { !initial } else { initial };
        assert_eq!(state.is_playing(), expected, "after {calls} calls");
    }
}

#[test]
fn toggle_mute_twice_restores_and_element_tracks_every_step() {
    let (mut player, log) = mount(PlayerConfig::primary());
    let initial = player.state().is_muted();

    player.toggle_mute().expect("first toggle");
    assert_eq!(player.state().is_muted(), !initial);
    assert_eq!(log.borrow().muted, player.state().is_muted());

    player.toggle_mute().expect("second toggle");
    assert_eq!(player.state().is_muted(), initial);
    assert_eq!(log.borrow().muted, player.state().is_muted());
}

#[test]
fn changing_to_non_lead_video_latches_switcher_and_resets_progress() {
    for prime_switcher in [false, true] {
        let (mut player, _log) = mount(PlayerConfig::primary());
        if prime_switcher {
            let element = player.element().clone();
            player.pump(|_| element.time_update(75.0));
            assert!(player.state().show_switcher());
        } else {
            let element = player.element().clone();
            player.pump(|_| element.time_update(30.0));
        }

        player.change_video(3).expect("change video");

        assert!(player.state().show_switcher());
        assert_eq!(player.state().progress_percent(), 0.0);
        assert!(player.state().is_playing());
    }
}

#[test]
fn changing_to_lead_video_never_sets_switcher_by_itself() {
    let (mut player, _log) = mount(PlayerConfig::primary());

    player.change_video(1).expect("change video");

    assert!(!player.state().show_switcher());
}

#[test]
fn switcher_latch_survives_later_progress_and_video_changes() {
    let (mut player, _log) = mount(PlayerConfig::primary());
    let element = player.element().clone();
    player.pump(|_| element.time_update(60.0));
    assert!(player.state().show_switcher());

    player.change_video(2).expect("change to 2");
    player.change_video(1).expect("back to lead");
    let element = player.element().clone();
    player.pump(|_| element.time_update(0.0));
    player.toggle_expand().expect("expand");

    assert!(player.state().show_switcher());
}

#[test]
fn fifty_percent_threshold_flips_exactly_when_crossed() {
    let (mut player, _log) = mount(PlayerConfig::primary());
    assert_eq!(player.state().current_video().id, 1);

    for (progress, expected) in [(10.0, false), (30.0, false), (49.0, false), (51.0, true)] {
        let element = player.element().clone();
        player.pump(|_| element.time_update(progress));
        assert_eq!(
            player.state().show_switcher(),
            expected,
            "switcher after progress {progress}"
        );
    }
}

#[test]
fn coupled_expansion_commands_play_then_pause() {
    let (mut player, log) = mount(PlayerConfig::secondary());
    assert!(!player.state().is_expanded());
    assert!(!player.state().is_playing());

    player.toggle_expand().expect("expand");
    assert!(player.state().is_expanded());
    assert!(player.state().is_playing());
    assert!(log.borrow().calls.contains(&Call::Play(PlayTrigger::UserGesture)));

    player.toggle_expand().expect("collapse");
    assert!(!player.state().is_expanded());
    assert!(!player.state().is_playing());
    assert_eq!(log.borrow().calls.last(), Some(&Call::Pause));
}

#[test]
fn decoupled_expansion_has_no_playback_side_effect() {
    let (mut player, log) = mount(PlayerConfig::primary());
    let calls_before = log.borrow().calls.len();
    let playing_before = player.state().is_playing();

    player.toggle_expand().expect("expand");
    player.toggle_expand().expect("collapse");

    assert_eq!(log.borrow().calls.len(), calls_before);
    assert_eq!(player.state().is_playing(), playing_before);
}

#[test]
fn rejected_autoplay_is_recovered_without_error() {
    let element = RecordingElement {
        reject_autoplay: true,
        ..RecordingElement::default()
    };
    let log = Rc::clone(&element.log);

    let player =
        BubblePlayer::mount(PlayerConfig::primary(), Catalog::primary(), element).expect("mount");

    assert!(!player.state().is_playing());
    assert!(log.borrow().calls.contains(&Call::Play(PlayTrigger::Autoplay)));
}

#[test]
fn expanded_secondary_autoplays_after_video_change() {
    let element = RecordingElement::default();
    let log = Rc::clone(&element.log);
    let mut player =
        BubblePlayer::mount(PlayerConfig::secondary(), Catalog::secondary(), element)
            .expect("mount");
    player.intent(Intent::BubbleClicked).expect("expand");
    log.borrow_mut().calls.clear();

    player.change_video(2).expect("change video");

    assert_eq!(
        log.borrow().calls,
        vec![Call::Load(2), Call::Play(PlayTrigger::Autoplay)]
    );
    assert!(player.state().is_playing());
    assert_eq!(log.borrow().listeners.len(), 3);
}

#[test]
fn expanded_secondary_recovers_from_rejected_autoplay() {
    let element = RecordingElement {
        reject_autoplay: true,
        ..RecordingElement::default()
    };
    let log = Rc::clone(&element.log);
    let mut player =
        BubblePlayer::mount(PlayerConfig::secondary(), Catalog::secondary(), element)
            .expect("mount");
    player.intent(Intent::BubbleClicked).expect("expand");
    assert!(player.state().is_playing());

    player.change_video(2).expect("rejection is not an error");

    assert!(log.borrow().calls.contains(&Call::Play(PlayTrigger::Autoplay)));
    assert!(player.state().is_expanded());
    assert!(!player.state().is_playing());
}

#[test]
fn video_id_one_never_sets_switcher_when_listed_second() {
    let catalog = Catalog::new(vec![
        VideoDescriptor::new(7, "videos/seven.mp4", "Seven"),
        VideoDescriptor::new(1, "videos/first.mp4", "First"),
    ])
    .expect("valid catalog");
    let mut player =
        BubblePlayer::mount(PlayerConfig::primary(), catalog, RecordingElement::default())
            .expect("mount");

    player.change_video(1).expect("change video");

    assert!(!player.state().show_switcher());
}

#[test]
fn unmount_detaches_all_three_listener_kinds() {
    let (player, log) = mount(PlayerConfig::primary());
    assert_eq!(log.borrow().listeners.len(), 3);
    log.borrow_mut().removed.clear();

    player.unmount();

    let log = log.borrow();
    assert!(log.listeners.is_empty());
    for kind in MediaEventKind::ALL {
        assert!(log.removed.contains(&kind), "{kind:?} listener detached");
    }
}

#[test]
fn dropping_player_also_detaches_listeners() {
    let (player, log) = mount(PlayerConfig::primary());

    drop(player);

    assert!(log.borrow().listeners.is_empty());
}

#[test]
fn unmounted_state_ignores_element_events() {
    let mut state =
        PlayerState::new(PlayerConfig::primary(), Catalog::primary()).expect("valid state");
    let _ = state.mount();
    let _ = state.unmount();
    let before = state.snapshot();

    let _ = state.apply(Input::Media(MediaEvent::Play));
    let _ = state.apply(Input::Media(MediaEvent::TimeUpdate {
        current_time: 90.0,
        duration: Some(100.0),
    }));
    let _ = state.apply(Input::Intent(Intent::ToggleExpand));

    assert_eq!(state.snapshot(), before);
}

#[test]
fn listeners_are_released_before_new_ones_attach() {
    let (mut player, log) = mount(PlayerConfig::primary());
    let first_ids: Vec<ListenerId> = log.borrow().listeners.keys().copied().collect();

    player.change_video(2).expect("change video");

    let log = log.borrow();
    assert_eq!(log.listeners.len(), 3);
    assert!(first_ids.iter().all(|id| !log.listeners.contains_key(id)));
    assert_eq!(
        log.calls.iter().filter(|call| **call == Call::Load(2)).count(),
        1
    );
}
