use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, monthly_view: bool) {
    let arrows = if monthly_view {
        ("[←/→]", " month  ")
    } else {
        ("[←/→]", " hadith  ")
    };

    let hints = [
        ("[Tab]", " view  "),
        arrows,
        ("[l]", " location  "),
        ("[a]", " alarm  "),
        ("[r]", " reload  "),
        ("[?]", " help  "),
        ("[q]", " quit"),
    ];

    let mut spans = Vec::new();
    for (key, label) in &hints {
        spans.push(Span::styled(*key, theme::teal()));
        spans.push(Span::styled(*label, theme::dim()));
    }

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
