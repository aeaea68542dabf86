use iced::widget::canvas::{self, Path};
use iced::widget::container;
use iced::{Color, Element, Length, Point, Rectangle, Size, Theme, mouse};

const TRACK_HEIGHT: f32 = 4.0;

/// Width of the filled part of a bar `width` pixels wide.
///
/// Values outside `[0, 100]` and non-finite values are clamped so the bar
/// never overflows or disappears on a transient bad reading.
pub fn fill_width(progress_percent: f64, width: f32) -> f32 {
    if width <= 0.0 || !progress_percent.is_finite() {
        return 0.0;
    }

    let ratio = (progress_percent.clamp(0.0, 100.0) / 100.0) as f32;
    ratio * width
}

#[derive(Debug)]
struct ProgressProgram {
    progress_percent: f64,
}

impl<Message> canvas::Program<Message> for ProgressProgram {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let track = Path::rectangle(Point::ORIGIN, frame.size());
        frame.fill(&track, Color::from_rgba(1.0, 1.0, 1.0, 0.3));

        let filled = fill_width(self.progress_percent, bounds.width);
        if filled > 0.0 {
            let bar = Path::rectangle(Point::ORIGIN, Size::new(filled, bounds.height));
            frame.fill(&bar, Color::WHITE);
        }

        vec![frame.into_geometry()]
    }
}

/// Renders the playback progress bar.
pub fn view<'a, Message>(progress_percent: f64) -> Element<'a, Message>
where
    Message: 'a,
{
    container(
        canvas::Canvas::new(ProgressProgram { progress_percent })
            .width(Length::Fill)
            .height(Length::Fixed(TRACK_HEIGHT)),
    )
    .width(Length::Fill)
    .into()
}
