use std::path::Path;

use bubble::{
    Catalog, CollapsedSurface, ControlsPlacement, Corner, Intent, PlayerConfig, PlayerSnapshot,
    SwitcherLabels, VideoDescriptor,
};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{Space, button, column, container, image, mouse_area, row, stack, text};
use iced::{Background, Border, Color, Element, Length, Theme};

use crate::widgets::progress;

const SURFACE_COLOR: Color = Color {
    r: 0.13,
    g: 0.13,
    b: 0.13,
    a: 1.0,
};

/// Label of one switcher button.
pub fn switcher_label(video: &VideoDescriptor, labels: SwitcherLabels) -> String {
    match labels {
        SwitcherLabels::Names => video.name.clone(),
        SwitcherLabels::Ids => video.id.to_string(),
    }
}

/// Horizontal and vertical alignment that pins the bubble to its corner.
pub fn corner_alignment(corner: Corner) -> (Horizontal, Vertical) {
    match corner {
        Corner::BottomLeft => (Horizontal::Left, Vertical::Bottom),
        Corner::BottomRight => (Horizontal::Right, Vertical::Bottom),
    }
}

/// Thumbnail to draw instead of the live surface, if one exists on disk.
pub fn thumbnail<'v>(
    video: &'v VideoDescriptor,
    config: &PlayerConfig,
    expanded: bool,
) -> Option<&'v Path> {
    if expanded || config.collapsed_surface != CollapsedSurface::Thumbnail {
        return None;
    }
    video
        .placeholder
        .as_deref()
        .map(Path::new)
        .filter(|path| path.is_file())
}

/// Renders the bubble pinned to its corner of a full-window container.
pub fn view<'a, Message>(
    snapshot: &PlayerSnapshot,
    config: &PlayerConfig,
    catalog: &'a Catalog,
    on_intent: fn(Intent) -> Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let layout = &config.layout;
    let expanded = snapshot.is_expanded;
    let size = layout.surface_size(expanded);
    let radius = layout.corner_radius(expanded);

    let mut layers: Vec<Element<'a, Message>> = vec![surface(snapshot, config)];
    if layout.controls_visible(expanded) {
        layers.push(controls(snapshot, config, on_intent));
    }
    if layout.switcher_visible(expanded, snapshot.show_switcher) {
        layers.push(switcher(snapshot, config, catalog, on_intent));
    }
    if expanded && layout.close_button {
        let close = button(text("✕").color(Color::WHITE))
            .on_press(on_intent(Intent::Close))
            .style(button::text);
        layers.push(
            container(close)
                .width(Length::Fill)
                .align_x(Horizontal::Right)
                .into(),
        );
    }

    let framed = container(stack(layers))
        .width(Length::Fixed(size.width))
        .height(Length::Fixed(size.height))
        .clip(true)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(SURFACE_COLOR)),
            border: Border {
                radius: radius.into(),
                ..Border::default()
            },
            ..container::Style::default()
        });

    let bubble: Element<'a, Message> = if !expanded && layout.expand_on_click {
        mouse_area(framed)
            .on_press(on_intent(Intent::BubbleClicked))
            .into()
    } else {
        framed.into()
    };

    let (align_x, align_y) = corner_alignment(layout.corner);
    container(bubble)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(layout.margin)
        .align_x(align_x)
        .align_y(align_y)
        .into()
}

fn surface<'a, Message>(snapshot: &PlayerSnapshot, config: &PlayerConfig) -> Element<'a, Message>
where
    Message: 'a,
{
    let video = &snapshot.current_video;

    let content: Element<'a, Message> = match thumbnail(video, config, snapshot.is_expanded) {
        Some(path) => image(image::Handle::from_path(path))
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => column![
            text(video.name.clone()).size(16).color(Color::WHITE),
            text(video.source.clone()).size(11).color(Color::from_rgb(0.6, 0.6, 0.6)),
        ]
        .spacing(4)
        .align_x(Horizontal::Center)
        .into(),
    };

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn controls<'a, Message>(
    snapshot: &PlayerSnapshot,
    config: &PlayerConfig,
    on_intent: fn(Intent) -> Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let layout = &config.layout;
    let play_label = if snapshot.is_playing { "Pause" } else { "Play" };
    let mute_label = if snapshot.is_muted { "Unmute" } else { "Mute" };

    let mut buttons = row![
        control_button(play_label, on_intent(Intent::TogglePlay)),
        Space::with_width(Length::Fill),
        control_button(mute_label, on_intent(Intent::ToggleMute)),
    ]
    .align_y(Vertical::Center);
    if !layout.close_button {
        let expand_label = if snapshot.is_expanded { "Shrink" } else { "Expand" };
        buttons = buttons
            .push(Space::with_width(Length::Fill))
            .push(control_button(expand_label, on_intent(Intent::ToggleExpand)));
    }

    let panel = column![buttons, progress::view(snapshot.progress_percent)]
        .spacing(8)
        .padding(16);

    let vertical = match layout.controls {
        ControlsPlacement::Top => Vertical::Top,
        ControlsPlacement::Bottom => Vertical::Bottom,
    };
    container(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(vertical)
        .into()
}

fn switcher<'a, Message>(
    snapshot: &PlayerSnapshot,
    config: &PlayerConfig,
    catalog: &'a Catalog,
    on_intent: fn(Intent) -> Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let layout = &config.layout;
    let buttons = catalog.iter().map(|video| -> Element<'a, Message> {
        let active = video.id == snapshot.current_video.id;
        let style: fn(&Theme, button::Status) -> button::Style = if active {
            button::primary
        } else {
            button::secondary
        };
        button(text(switcher_label(video, layout.switcher_labels)).size(13))
            .on_press(on_intent(Intent::ChangeVideo(video.id)))
            .style(style)
            .into()
    });

    let (list, vertical): (Element<'a, Message>, Vertical) = match layout.switcher_labels {
        SwitcherLabels::Names => (
            column(buttons).spacing(8).width(Length::Fill).into(),
            Vertical::Bottom,
        ),
        SwitcherLabels::Ids => (row(buttons).spacing(8).into(), Vertical::Top),
    };

    container(list)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding([48.0, 8.0])
        .align_y(vertical)
        .into()
}

fn control_button<'a, Message>(label: &'a str, message: Message) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    button(text(label).color(Color::WHITE))
        .on_press(message)
        .style(button::text)
        .into()
}
