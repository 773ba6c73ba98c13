use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::models::{DailyPrayerTimes, PrayerName};
use crate::tui::theme;

/// Today's full timing grid. The upcoming canonical prayer row is
/// highlighted; Imsak/Sunrise/Midnight are informational only.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    times: Option<&DailyPrayerTimes>,
    next_name: Option<PrayerName>,
    loading: bool,
) {
    let block = Block::default()
        .title(Span::styled(" Today ", theme::teal()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let Some(times) = times else {
        let message = if loading {
            Span::styled("  Loading prayer times…", theme::amber())
        } else {
            Span::styled("  No data. Set a location with [l].", theme::dim())
        };
        let placeholder =
            Paragraph::new(vec![Line::from(""), Line::from(message)]).block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let items: Vec<ListItem> = PrayerName::ALL
        .iter()
        .map(|&name| {
            let is_next = next_name == Some(name);
            let is_canonical = PrayerName::CANONICAL.contains(&name);

            let time_str = times
                .get(name)
                .split_whitespace()
                .next()
                .unwrap_or("--:--")
                .to_string();

            let name_style = if is_next {
                theme::teal().add_modifier(Modifier::BOLD)
            } else if is_canonical {
                theme::bold()
            } else {
                theme::dim()
            };

            let marker = if is_next {
                Span::styled("◀ next", theme::teal())
            } else {
                Span::raw("")
            };

            let line = Line::from(vec![
                Span::styled(format!("  {:<10}", name.display_name()), name_style),
                Span::styled(format!("{:<8}", time_str), theme::dim()),
                marker,
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
