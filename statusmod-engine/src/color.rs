//! Color alias resolution.
//!
//! Players type colors in English or German, with or without underscores and
//! in any case. Everything maps onto the closed [`ColorId`] set; anything
//! unknown falls back to [`ColorId::Reset`].

use std::fmt;

/// Raw color key meaning "no explicit color".
pub const RESET_KEY: &str = "reset";

/// Canonical chat colors a status label can be rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorId {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    #[default]
    Reset,
}

impl ColorId {
    pub const ALL: [ColorId; 17] = [
        ColorId::Black,
        ColorId::DarkBlue,
        ColorId::DarkGreen,
        ColorId::DarkAqua,
        ColorId::DarkRed,
        ColorId::DarkPurple,
        ColorId::Gold,
        ColorId::Gray,
        ColorId::DarkGray,
        ColorId::Blue,
        ColorId::Green,
        ColorId::Aqua,
        ColorId::Red,
        ColorId::LightPurple,
        ColorId::Yellow,
        ColorId::White,
        ColorId::Reset,
    ];

    /// Canonical English, underscore separated name.
    pub fn name(self) -> &'static str {
        match self {
            ColorId::Black => "black",
            ColorId::DarkBlue => "dark_blue",
            ColorId::DarkGreen => "dark_green",
            ColorId::DarkAqua => "dark_aqua",
            ColorId::DarkRed => "dark_red",
            ColorId::DarkPurple => "dark_purple",
            ColorId::Gold => "gold",
            ColorId::Gray => "gray",
            ColorId::DarkGray => "dark_gray",
            ColorId::Blue => "blue",
            ColorId::Green => "green",
            ColorId::Aqua => "aqua",
            ColorId::Red => "red",
            ColorId::LightPurple => "light_purple",
            ColorId::Yellow => "yellow",
            ColorId::White => "white",
            ColorId::Reset => RESET_KEY,
        }
    }

    /// Legacy formatting code (the character following `§`).
    pub fn code(self) -> char {
        match self {
            ColorId::Black => '0',
            ColorId::DarkBlue => '1',
            ColorId::DarkGreen => '2',
            ColorId::DarkAqua => '3',
            ColorId::DarkRed => '4',
            ColorId::DarkPurple => '5',
            ColorId::Gold => '6',
            ColorId::Gray => '7',
            ColorId::DarkGray => '8',
            ColorId::Blue => '9',
            ColorId::Green => 'a',
            ColorId::Aqua => 'b',
            ColorId::Red => 'c',
            ColorId::LightPurple => 'd',
            ColorId::Yellow => 'e',
            ColorId::White => 'f',
            ColorId::Reset => 'r',
        }
    }

    pub fn is_reset(self) -> bool {
        self == ColorId::Reset
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const ALIASES: &[(&str, ColorId)] = &[
    // english
    ("black", ColorId::Black),
    ("dark_blue", ColorId::DarkBlue),
    ("darkblue", ColorId::DarkBlue),
    ("dark_green", ColorId::DarkGreen),
    ("darkgreen", ColorId::DarkGreen),
    ("dark_aqua", ColorId::DarkAqua),
    ("darkaqua", ColorId::DarkAqua),
    ("dark_red", ColorId::DarkRed),
    ("darkred", ColorId::DarkRed),
    ("dark_purple", ColorId::DarkPurple),
    ("darkpurple", ColorId::DarkPurple),
    ("purple", ColorId::DarkPurple),
    ("gold", ColorId::Gold),
    ("orange", ColorId::Gold),
    ("gray", ColorId::Gray),
    ("grey", ColorId::Gray),
    ("dark_gray", ColorId::DarkGray),
    ("darkgray", ColorId::DarkGray),
    ("dark_grey", ColorId::DarkGray),
    ("darkgrey", ColorId::DarkGray),
    ("blue", ColorId::Blue),
    ("green", ColorId::Green),
    ("aqua", ColorId::Aqua),
    ("cyan", ColorId::Aqua),
    ("red", ColorId::Red),
    ("light_purple", ColorId::LightPurple),
    ("lightpurple", ColorId::LightPurple),
    ("lp", ColorId::LightPurple),
    ("pink", ColorId::LightPurple),
    ("yellow", ColorId::Yellow),
    ("white", ColorId::White),
    ("reset", ColorId::Reset),
    ("none", ColorId::Reset),
    // german
    ("schwarz", ColorId::Black),
    ("dunkelblau", ColorId::DarkBlue),
    ("dunkelgrün", ColorId::DarkGreen),
    ("dunkelgruen", ColorId::DarkGreen),
    ("dunkeltürkis", ColorId::DarkAqua),
    ("dunkeltuerkis", ColorId::DarkAqua),
    ("dunkelrot", ColorId::DarkRed),
    ("lila", ColorId::DarkPurple),
    ("violett", ColorId::DarkPurple),
    ("grau", ColorId::Gray),
    ("dunkelgrau", ColorId::DarkGray),
    ("blau", ColorId::Blue),
    ("grün", ColorId::Green),
    ("gruen", ColorId::Green),
    ("türkis", ColorId::Aqua),
    ("tuerkis", ColorId::Aqua),
    ("rot", ColorId::Red),
    ("rosa", ColorId::LightPurple),
    ("gelb", ColorId::Yellow),
    ("weiß", ColorId::White),
    ("weiss", ColorId::White),
    ("keine", ColorId::Reset),
];

/// Resolve a user supplied color key to a canonical color.
///
/// Never fails: absent or unknown keys resolve to [`ColorId::Reset`].
pub fn resolve(key: Option<&str>) -> ColorId {
    let Some(key) = key else {
        return ColorId::Reset;
    };

    let normalized = normalize(key);
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, color)| *color)
        .unwrap_or(ColorId::Reset)
}

/// Whether a raw key names the reset sentinel itself.
pub fn is_reset_key(key: &str) -> bool {
    key.trim().eq_ignore_ascii_case(RESET_KEY)
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "_")
}
