use std::time::Duration;

use bubble::{AppConfig, BubblePlayer, HostedEmbed, Intent};
use iced::widget::{Space, container, text};
use iced::{Color, Element, Length, Subscription, Task};
use tracing::{error, info};

use crate::clock::{CLIP_DURATION, ClockElement};
use crate::widgets::player;

/// Interval at which the simulated element advances.
pub const TICK: Duration = Duration::from_millis(250);

/// UI messages handled by the iced app update loop.
#[derive(Debug, Clone)]
pub enum Message {
    Bubble(Intent),
    Tick,
}

enum Screen {
    Player(BubblePlayer<ClockElement>),
    /// Hosted page; renders nothing without a token.
    Hosted(Option<HostedEmbed>),
    Unavailable,
}

/// Root UI state.
pub struct AppState {
    screen: Screen,
    status: Option<String>,
}

impl AppState {
    /// Boots the app from environment configuration.
    pub fn boot() -> (Self, Task<Message>) {
        let state = match AppConfig::from_env().and_then(|config| Self::from_config(&config)) {
            Ok(state) => state,
            Err(error) => {
                error!(%error, "bubble player unavailable");
                Self {
                    screen: Screen::Unavailable,
                    status: Some(error.to_string()),
                }
            }
        };
        (state, Task::none())
    }

    /// Mounts the page selected by `config`.
    pub fn from_config(config: &AppConfig) -> bubble::Result<Self> {
        let Some(player_config) = config.player_config() else {
            info!(hosted = config.hosted.is_some(), "hosted page selected");
            return Ok(Self {
                screen: Screen::Hosted(config.hosted.clone()),
                status: None,
            });
        };

        let catalog = config.catalog()?;
        let element = ClockElement::new(config.autoplay_policy, CLIP_DURATION);
        let mut player = BubblePlayer::mount(player_config, catalog, element)?;
        player.pump(ClockElement::drain_events);
        info!(variant = ?config.variant, "bubble player mounted");

        Ok(Self {
            screen: Screen::Player(player),
            status: None,
        })
    }

    /// Handles one UI message.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let Screen::Player(player) = &mut self.screen else {
            return Task::none();
        };

        match message {
            Message::Bubble(intent) => {
                match player.intent(intent) {
                    Ok(()) => self.status = None,
                    Err(error) => self.status = Some(error.to_string()),
                }
                player.pump(ClockElement::drain_events);
            }
            Message::Tick => player.pump(|element| element.advance(TICK)),
        }

        Task::none()
    }

    /// Renders the UI tree.
    pub fn view(&self) -> Element<'_, Message> {
        let page: Element<'_, Message> = match &self.screen {
            Screen::Player(player) => {
                let state = player.state();
                player::view(
                    &state.snapshot(),
                    state.config(),
                    state.catalog(),
                    Message::Bubble,
                )
            }
            Screen::Hosted(Some(embed)) => container(text(format!("Hosted video {}", embed.token())))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
            Screen::Hosted(None) | Screen::Unavailable => {
                Space::new(Length::Fill, Length::Fill).into()
            }
        };

        match &self.status {
            Some(status) => iced::widget::column![
                text(status.clone()).color(Color::from_rgb(0.9, 0.3, 0.3)),
                page
            ]
            .into(),
            None => page,
        }
    }

    /// Drives the simulated element while a player is mounted.
    pub fn subscription(&self) -> Subscription<Message> {
        match self.screen {
            Screen::Player(_) => iced::time::every(TICK).map(|_| Message::Tick),
            Screen::Hosted(_) | Screen::Unavailable => Subscription::none(),
        }
    }

    #[cfg(test)]
    fn player(&self) -> &BubblePlayer<ClockElement> {
        match &self.screen {
            Screen::Player(player) => player,
            _ => panic!("expected a mounted player"),
        }
    }
}
