use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::Location;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, location: &Location, alarm_enabled: bool) {
    let now = Local::now();
    let date_str = now.format("%A, %b %d, %Y").to_string();
    let clock_str = now.format("%H:%M:%S").to_string();

    let title_line = Line::from(vec![
        Span::styled("  وقت  ", theme::teal().add_modifier(Modifier::BOLD)),
        Span::styled("waqt", theme::teal()),
    ]);

    let alarm_span = if alarm_enabled {
        Span::styled("alarm on", theme::green())
    } else {
        Span::styled("alarm off", theme::dim())
    };

    let info_line = Line::from(vec![
        Span::styled(location.to_string(), theme::amber()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(date_str, theme::dim()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(clock_str, theme::bold()),
        Span::styled("  ·  ", theme::dim()),
        alarm_span,
    ]);

    let text = vec![title_line, Line::from(""), info_line];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::teal().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
