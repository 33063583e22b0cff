use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{DEFAULT_PAGE_DIMENSIONS, MARGIN_FACTORS};
use crate::validate::ValidationError;

#[derive(Error, Debug)]
pub enum StampError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, StampError>;

/// Returned when an external enum value is not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Implements `Display`/`FromStr` over the external names returned by `as_str`.
macro_rules! external_names {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let needle = s.trim();
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                        expected: <$ty>::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

/// What the stamp draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum StampType {
    #[default]
    Text,
    Image,
}

impl StampType {
    pub const ALL: [StampType; 2] = [StampType::Text, StampType::Image];

    pub fn as_str(self) -> &'static str {
        match self {
            StampType::Text => "text",
            StampType::Image => "image",
        }
    }
}

external_names!(StampType, "stamp type");

/// Script of the stamp text. Selects the font family and the default font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Alphabet {
    #[default]
    Roman,
    Arabic,
    Japanese,
    Korean,
    Chinese,
    Thai,
}

impl Alphabet {
    pub const ALL: [Alphabet; 6] = [
        Alphabet::Roman,
        Alphabet::Arabic,
        Alphabet::Japanese,
        Alphabet::Korean,
        Alphabet::Chinese,
        Alphabet::Thai,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Alphabet::Roman => "roman",
            Alphabet::Arabic => "arabic",
            Alphabet::Japanese => "japanese",
            Alphabet::Korean => "korean",
            Alphabet::Chinese => "chinese",
            Alphabet::Thai => "thai",
        }
    }

    /// Font size used until the user picks one for this alphabet.
    ///
    /// Non-Latin scripts need larger glyphs for the same legibility.
    pub fn default_font_size(self) -> f32 {
        match self {
            Alphabet::Roman => 80.0,
            Alphabet::Arabic | Alphabet::Thai => 96.0,
            Alphabet::Japanese | Alphabet::Korean | Alphabet::Chinese => 100.0,
        }
    }

    /// Font family the stamping backend should draw this script with
    pub fn font_family(self) -> &'static str {
        match self {
            Alphabet::Roman => "NotoSans-Regular",
            Alphabet::Arabic => "NotoSansArabic-Regular",
            Alphabet::Japanese => "NotoSansJP-Regular",
            Alphabet::Korean => "NotoSansKR-Regular",
            Alphabet::Chinese => "NotoSansSC-Regular",
            Alphabet::Thai => "NotoSansThai-Regular",
        }
    }
}

external_names!(Alphabet, "alphabet");

/// Distance kept between a quick-grid anchor and the page edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Margin {
    Small,
    #[default]
    Medium,
    Large,
    XLarge,
}

impl Margin {
    pub const ALL: [Margin; 4] = [Margin::Small, Margin::Medium, Margin::Large, Margin::XLarge];

    pub fn as_str(self) -> &'static str {
        match self {
            Margin::Small => "small",
            Margin::Medium => "medium",
            Margin::Large => "large",
            Margin::XLarge => "x-large",
        }
    }

    /// Fraction of the mean page side used as inset
    pub fn factor(self) -> f32 {
        match self {
            Margin::Small => MARGIN_FACTORS[0],
            Margin::Medium => MARGIN_FACTORS[1],
            Margin::Large => MARGIN_FACTORS[2],
            Margin::XLarge => MARGIN_FACTORS[3],
        }
    }

    /// Inset from every page edge, in page units
    pub fn inset(self, page: PageSize) -> f32 {
        self.factor() * (page.width + page.height) / 2.0
    }
}

external_names!(Margin, "margin");

/// One of the nine quick-grid positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum AnchorCell {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    #[default]
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl AnchorCell {
    pub const ALL: [AnchorCell; 9] = [
        AnchorCell::TopLeft,
        AnchorCell::TopCenter,
        AnchorCell::TopRight,
        AnchorCell::MiddleLeft,
        AnchorCell::Center,
        AnchorCell::MiddleRight,
        AnchorCell::BottomLeft,
        AnchorCell::BottomCenter,
        AnchorCell::BottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnchorCell::TopLeft => "top-left",
            AnchorCell::TopCenter => "top-center",
            AnchorCell::TopRight => "top-right",
            AnchorCell::MiddleLeft => "middle-left",
            AnchorCell::Center => "center",
            AnchorCell::MiddleRight => "middle-right",
            AnchorCell::BottomLeft => "bottom-left",
            AnchorCell::BottomCenter => "bottom-center",
            AnchorCell::BottomRight => "bottom-right",
        }
    }

    /// Column (0 = left) and row (0 = top) of the cell
    pub fn grid_position(self) -> (usize, usize) {
        let index = self as usize;
        (index % 3, index / 3)
    }

    /// Numeric position used by stamp backends: 1-3 bottom row, 7-9 top row,
    /// left to right.
    pub fn grid_number(self) -> u8 {
        let (col, row) = self.grid_position();
        ((2 - row) * 3 + col + 1) as u8
    }

    pub fn from_grid_number(number: u8) -> Option<Self> {
        if !(1..=9).contains(&number) {
            return None;
        }
        let zero_based = (number - 1) as usize;
        let row = 2 - zero_based / 3;
        let col = zero_based % 3;
        Self::ALL.get(row * 3 + col).copied()
    }
}

external_names!(AnchorCell, "anchor cell");

/// How the anchor is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum PositionMode {
    #[default]
    QuickGrid,
    Custom,
}

impl PositionMode {
    pub const ALL: [PositionMode; 2] = [PositionMode::QuickGrid, PositionMode::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            PositionMode::QuickGrid => "quick-grid",
            PositionMode::Custom => "custom",
        }
    }
}

external_names!(PositionMode, "position mode");

/// A point in page-relative coordinates, (0, 0) top-left and (1, 1) bottom-right
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl Default for NormalizedPoint {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl NormalizedPoint {
    /// Create a point, clamping both coordinates into [0, 1]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }.clamped()
    }

    /// Clamp into the unit square; non-finite coordinates fall back to the middle
    pub fn clamped(self) -> Self {
        let clamp = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 };
        Self {
            x: clamp(self.x),
            y: clamp(self.y),
        }
    }
}

/// Out-of-range coordinates are clamped as in [`NormalizedPoint::new`]
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NormalizedPoint {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct RawPoint {
            x: f32,
            y: f32,
        }

        let raw = RawPoint::deserialize(deserializer)?;
        Ok(Self::new(raw.x, raw.y))
    }
}

/// RGB text color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        // #d3d3d3
        Self::rgb(0xd3, 0xd3, 0xd3)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color '{0}', expected #rrggbb or #rgb")]
pub struct InvalidColor(pub String);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> std::result::Result<Self, InvalidColor> {
        let invalid = || InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels scaled to 0.0..=1.0 as PDF color operators expect
    pub fn to_unit_rgb(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::Deserialize;

        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl Default for PageSize {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1)
    }
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
