use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(14, 20, 24);
pub const SURFACE: Color = Color::Rgb(20, 30, 36);
pub const BORDER: Color = Color::Rgb(38, 60, 66);
pub const TEXT: Color = Color::Rgb(206, 226, 228);
pub const TEXT_DIM: Color = Color::Rgb(104, 132, 134);
pub const TEAL: Color = Color::Rgb(84, 196, 184);
pub const GREEN: Color = Color::Rgb(98, 168, 106);
pub const AMBER: Color = Color::Rgb(214, 160, 78);
pub const RED: Color = Color::Rgb(198, 92, 78);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn teal() -> Style {
    Style::default().fg(TEAL)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}
