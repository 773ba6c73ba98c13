use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_big_text::{BigText, PixelSize};

use crate::models::NextPrayerInfo;
use crate::tui::theme;
use crate::utils::format::format_countdown;

pub fn render(frame: &mut Frame, area: Rect, next: Option<&NextPrayerInfo>) {
    let block = Block::default()
        .title(Span::styled(" Next Prayer ", theme::teal()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(next) = next else {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("  Waiting for prayer times…", theme::dim())),
        ]);
        frame.render_widget(placeholder, inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4)])
        .split(inner);

    let caption = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!("  {}", next.name.display_name().to_uppercase()),
                theme::teal().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  at {}", next.time), theme::dim()),
        ]),
        Line::from(""),
    ]);
    frame.render_widget(caption, chunks[0]);

    let countdown = format_countdown(next.remaining.num_seconds());
    let big = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(theme::amber().add_modifier(Modifier::BOLD))
        .lines(vec![Line::from(countdown)])
        .build();
    frame.render_widget(big, chunks[1]);
}
