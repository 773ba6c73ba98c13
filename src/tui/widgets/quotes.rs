use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::models::Quote;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, quotes: &[Quote], index: usize) {
    let block = Block::default()
        .title(Span::styled(" Hadith of the Day ", theme::teal()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    if quotes.is_empty() {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("  Loading hadiths…", theme::dim())),
        ])
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let quote = &quotes[index % quotes.len()];

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(quote.text.clone(), theme::bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("— {}", quote.source),
            theme::teal().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}", index % quotes.len() + 1, quotes.len()),
            theme::dim(),
        )),
    ];

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
