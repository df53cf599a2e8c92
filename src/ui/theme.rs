use crossterm::style::{Color, StyledContent, Stylize};

use crate::model::board::LabelColor;

pub fn label_color(color: Option<&str>) -> Color {
    match color.and_then(|c| c.parse::<LabelColor>().ok()) {
        Some(LabelColor::Yellow) => Color::Yellow,
        Some(LabelColor::Purple) => Color::Rgb { r: 0x89, g: 0x60, b: 0xB3 },
        Some(LabelColor::Blue) => Color::Blue,
        Some(LabelColor::Red) => Color::Red,
        Some(LabelColor::Green) => Color::Green,
        Some(LabelColor::Orange) => Color::Rgb { r: 0xFF, g: 0x9F, b: 0x1A },
        Some(LabelColor::Black) => Color::DarkGrey,
        Some(LabelColor::Sky) => Color::Cyan,
        Some(LabelColor::Pink) => Color::Magenta,
        Some(LabelColor::Lime) => Color::Rgb { r: 0x51, g: 0xE8, b: 0x98 },
        None => Color::Grey,
    }
}

pub fn warning(message: &str) -> StyledContent<String> {
    message.to_string().yellow().bold()
}

pub fn error(message: &str) -> StyledContent<String> {
    message.to_string().red().bold()
}

pub fn success(message: &str) -> StyledContent<String> {
    message.to_string().green().bold()
}

pub fn muted(message: &str) -> StyledContent<String> {
    message.to_string().dark_grey()
}
