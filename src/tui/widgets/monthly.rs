use chrono::{Local, NaiveDate};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
};

use crate::models::{MonthlyPrayerDay, PrayerName};
use crate::tui::theme;

const COLUMNS: [PrayerName; 6] = [
    PrayerName::Fajr,
    PrayerName::Sunrise,
    PrayerName::Dhuhr,
    PrayerName::Asr,
    PrayerName::Maghrib,
    PrayerName::Isha,
];

/// The calendar rows carry the API's readable "DD-MM-YYYY" date.
fn row_is_today(date: &str, today: NaiveDate) -> bool {
    date == today.format("%d-%m-%Y").to_string()
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    days: &[MonthlyPrayerDay],
    month_title: &str,
    loading: bool,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", month_title),
            theme::teal().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Span::styled(" [←/→] month ", theme::dim()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    // While a fetch is in flight only the placeholder shows, never rows
    // from an earlier month or location.
    if loading || days.is_empty() {
        let message = if loading {
            Span::styled("  Loading calendar…", theme::amber())
        } else {
            Span::styled("  No calendar data for this month.", theme::dim())
        };
        let placeholder =
            Paragraph::new(vec![Line::from(""), Line::from(message)]).block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let header = Row::new(
        std::iter::once(Cell::from(Span::styled("Date", theme::teal())))
            .chain(COLUMNS.iter().map(|name| {
                Cell::from(Span::styled(name.display_name(), theme::teal()))
            })),
    )
    .bottom_margin(1);

    let today = Local::now().date_naive();

    let rows: Vec<Row> = days
        .iter()
        .map(|day| {
            let is_today = row_is_today(&day.date, today);

            let date_style = if is_today {
                theme::teal().add_modifier(Modifier::BOLD)
            } else {
                theme::bold()
            };
            let time_style = if is_today { theme::teal() } else { theme::dim() };

            Row::new(
                std::iter::once(Cell::from(Span::styled(day.date.clone(), date_style)))
                    .chain(COLUMNS.iter().map(|&name| {
                        let time = day
                            .timings
                            .get(name)
                            .split_whitespace()
                            .next()
                            .unwrap_or("--:--")
                            .to_string();
                        Cell::from(Span::styled(time, time_style))
                    })),
            )
        })
        .collect();

    let widths = [
        Constraint::Length(13),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_row_matches_readable_date_format() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 3).unwrap();
        assert!(row_is_today("03-04-2025", today));
        assert!(!row_is_today("04-04-2025", today));
        assert!(!row_is_today("03-04-2024", today));
        // Single-digit days are zero padded by the API.
        assert!(!row_is_today("3-4-2025", today));
    }
}
