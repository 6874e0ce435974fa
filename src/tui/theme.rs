use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::item::Mode;

/// Screen colors. Every slot can be overridden from `[ui.colors]`.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    /// Inactive tab labels and completed items
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub work_accent: Color,
    pub travel_accent: Color,
    pub selection_bg: Color,
    pub input_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x00, 0x00, 0x00),
            text: Color::Rgb(0xE0, 0xE0, 0xE0),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x5C, 0x5C, 0x60),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            work_accent: Color::Rgb(0x44, 0x88, 0xFF),
            travel_accent: Color::Rgb(0xFF, 0xB0, 0x3B),
            selection_bg: Color::Rgb(0x3A, 0x3D, 0x40),
            input_bg: Color::Rgb(0x1E, 0x1E, 0x22),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x00, 0x00, 0x00),
        }
    }
}

impl Theme {
    /// Defaults with the `[ui.colors]` overrides applied. Bad entries are
    /// logged and skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (slot, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(slot = %slot, value = %value, "ignoring invalid color");
                continue;
            };
            match theme.slot_mut(slot) {
                Some(target) => *target = color,
                None => tracing::warn!(slot = %slot, "unknown color slot"),
            }
        }
        theme
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Color> {
        let slot = match name {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "text_bright" => &mut self.text_bright,
            "highlight" => &mut self.highlight,
            "dim" => &mut self.dim,
            "red" => &mut self.red,
            "green" => &mut self.green,
            "work" => &mut self.work_accent,
            "travel" => &mut self.travel_accent,
            "selection_bg" => &mut self.selection_bg,
            "input_bg" => &mut self.input_bg,
            "search_match_bg" => &mut self.search_match_bg,
            "search_match_fg" => &mut self.search_match_fg,
            _ => return None,
        };
        Some(slot)
    }

    /// Accent for a list's tab and input prefix
    pub fn accent(&self, mode: Mode) -> Color {
        match mode {
            Mode::Work => self.work_accent,
            Mode::Travel => self.travel_accent,
        }
    }

    pub fn item_color(&self, completed: bool) -> Color {
        if completed { self.dim } else { self.text_bright }
    }
}

/// `#RRGGBB` or `#RGB`
fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        // #abc is #aabbcc
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 0x11);
            Some(Color::Rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}
