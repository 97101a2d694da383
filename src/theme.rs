use tui::style::Color;

/// Colors every view draws with. One static palette per mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub card: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub primary: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub border: Color,
}

pub static DARK: Palette = Palette {
    background: Color::Rgb(0x12, 0x12, 0x12),
    surface: Color::Rgb(0x1e, 0x1e, 0x1e),
    card: Color::Rgb(0x2d, 0x2d, 0x2d),
    text: Color::Rgb(0xff, 0xff, 0xff),
    text_secondary: Color::Rgb(0xb3, 0xb3, 0xb3),
    primary: Color::Rgb(0x3f, 0x51, 0xb5),
    success: Color::Rgb(0x66, 0xbb, 0x6a),
    error: Color::Rgb(0xef, 0x53, 0x50),
    warning: Color::Rgb(0xff, 0xa7, 0x26),
    border: Color::Rgb(0x40, 0x40, 0x40),
};

pub static LIGHT: Palette = Palette {
    background: Color::Rgb(0xf5, 0xf5, 0xf5),
    surface: Color::Rgb(0xff, 0xff, 0xff),
    card: Color::Rgb(0xff, 0xff, 0xff),
    text: Color::Rgb(0x33, 0x33, 0x33),
    text_secondary: Color::Rgb(0x66, 0x66, 0x66),
    primary: Color::Rgb(0x1a, 0x23, 0x7e),
    success: Color::Rgb(0x4c, 0xaf, 0x50),
    error: Color::Rgb(0xf4, 0x43, 0x36),
    warning: Color::Rgb(0xff, 0x98, 0x00),
    border: Color::Rgb(0xe0, 0xe0, 0xe0),
};

/// Light/dark mode, owned by the app and handed to draw code by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    pub is_dark: bool,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self { is_dark: true }
    }
}

impl ThemeState {
    pub fn new(is_dark: bool) -> Self {
        Self { is_dark }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        Self { is_dark: !self.is_dark }
    }

    pub fn palette(&self) -> &'static Palette {
        if self.is_dark { &DARK } else { &LIGHT }
    }

    pub fn label(&self) -> &'static str {
        if self.is_dark { "dark" } else { "light" }
    }
}

/// Parse `#rrggbb` into a terminal color.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_palette() {
        let theme = ThemeState::default();
        assert_eq!(theme.palette(), &DARK);
        let light = theme.toggled();
        assert!(!light.is_dark);
        assert_eq!(light.palette(), &LIGHT);
        assert_eq!(light.toggled(), theme);
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex("#461D7C"), Some(Color::Rgb(0x46, 0x1d, 0x7c)));
        assert_eq!(parse_hex("461D7C"), None);
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }
}
