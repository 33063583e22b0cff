use std::sync::Arc;

use crate::constants::DEFAULT_OPACITY;
use crate::layout::Placement;
use crate::types::*;

/// Image payload of an image stamp.
///
/// Decoding is not done here: the caller supplies the native pixel size
/// alongside the raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct StampImage {
    pub filename: String,
    data: Arc<[u8]>,
    pub width_px: u32,
    pub height_px: u32,
}

impl StampImage {
    pub fn new(
        filename: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
        width_px: u32,
        height_px: u32,
    ) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
            width_px,
            height_px,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether this payload can be drawn: it has bytes and a non-degenerate size
    pub fn is_present(&self) -> bool {
        !self.data.is_empty() && self.width_px > 0 && self.height_px > 0
    }

    /// Native width / height
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.width_px == 0 || self.height_px == 0 {
            return None;
        }
        Some(self.width_px as f32 / self.height_px as f32)
    }
}

/// A single field change, applied with [`StampParameters::update_field`]
#[derive(Debug, Clone, PartialEq)]
pub enum StampField {
    StampType(StampType),
    StampText(String),
    Alphabet(Alphabet),
    StampImage(Option<StampImage>),
    FontSize(f32),
    Rotation(f32),
    Opacity(f32),
    CustomColor(Color),
    PositionMode(PositionMode),
    AnchorCell(AnchorCell),
    CustomPoint(NormalizedPoint),
    Margin(Margin),
    PageSelection(String),
}

/// Everything needed to describe one stamp: what to draw, how, and on which pages.
///
/// Values are immutable snapshots. Changing a field goes through
/// [`update_field`](Self::update_field), which returns a new record and
/// recomputes derived defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StampParameters {
    stamp_type: StampType,
    stamp_text: String,
    alphabet: Alphabet,
    #[cfg_attr(feature = "serde", serde(skip))]
    stamp_image: Option<StampImage>,
    /// `None` until the user picks a size for the current alphabet
    font_size: Option<f32>,
    rotation: f32,
    opacity: f32,
    custom_color: Color,
    position_mode: PositionMode,
    anchor_cell: AnchorCell,
    custom_point: NormalizedPoint,
    margin: Margin,
    page_selection: String,
}

impl Default for StampParameters {
    fn default() -> Self {
        Self {
            stamp_type: StampType::Text,
            stamp_text: String::new(),
            alphabet: Alphabet::Roman,
            stamp_image: None,
            font_size: None,
            rotation: 0.0,
            opacity: DEFAULT_OPACITY,
            custom_color: Color::default(),
            position_mode: PositionMode::QuickGrid,
            anchor_cell: AnchorCell::Center,
            custom_point: NormalizedPoint::default(),
            margin: Margin::Medium,
            page_selection: String::new(),
        }
    }
}

impl StampParameters {
    /// A text stamp with default formatting
    pub fn text(text: impl Into<String>) -> Self {
        Self::default().update_field(StampField::StampText(text.into()))
    }

    /// An image stamp with default formatting
    pub fn image(image: StampImage) -> Self {
        Self::default()
            .update_field(StampField::StampType(StampType::Image))
            .update_field(StampField::StampImage(Some(image)))
    }

    /// Return a copy with one field changed.
    ///
    /// Selecting a different alphabet drops any font size override so the
    /// new alphabet's default applies.
    #[must_use]
    pub fn update_field(&self, field: StampField) -> Self {
        let mut next = self.clone();
        match field {
            StampField::StampType(v) => next.stamp_type = v,
            StampField::StampText(v) => next.stamp_text = v,
            StampField::Alphabet(v) => {
                if v != next.alphabet {
                    next.alphabet = v;
                    next.font_size = None;
                }
            }
            StampField::StampImage(v) => next.stamp_image = v,
            StampField::FontSize(v) => next.font_size = Some(v),
            StampField::Rotation(v) => next.rotation = v,
            StampField::Opacity(v) => next.opacity = v,
            StampField::CustomColor(v) => next.custom_color = v,
            StampField::PositionMode(v) => next.position_mode = v,
            StampField::AnchorCell(v) => next.anchor_cell = v,
            StampField::CustomPoint(v) => next.custom_point = v.clamped(),
            StampField::Margin(v) => next.margin = v,
            StampField::PageSelection(v) => next.page_selection = v,
        }
        next
    }

    /// Apply several changes in order
    #[must_use]
    pub fn update_fields(&self, fields: impl IntoIterator<Item = StampField>) -> Self {
        fields
            .into_iter()
            .fold(self.clone(), |params, field| params.update_field(field))
    }

    pub fn stamp_type(&self) -> StampType {
        self.stamp_type
    }

    pub fn stamp_text(&self) -> &str {
        &self.stamp_text
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn stamp_image(&self) -> Option<&StampImage> {
        self.stamp_image.as_ref()
    }

    /// Font size for text stamps, box height for image stamps
    pub fn font_size(&self) -> f32 {
        self.font_size
            .unwrap_or_else(|| self.alphabet.default_font_size())
    }

    /// Whether the font size was chosen by the user rather than derived
    pub fn font_size_overridden(&self) -> bool {
        self.font_size.is_some()
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Opacity in percent
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Opacity as 0.0..=1.0
    pub fn opacity_fraction(&self) -> f32 {
        (self.opacity / 100.0).clamp(0.0, 1.0)
    }

    pub fn custom_color(&self) -> Color {
        self.custom_color
    }

    /// The mode as selected, see [`effective_placement`](Self::effective_placement)
    pub fn position_mode(&self) -> PositionMode {
        self.position_mode
    }

    pub fn anchor_cell(&self) -> AnchorCell {
        self.anchor_cell
    }

    pub fn custom_point(&self) -> NormalizedPoint {
        self.custom_point
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    pub fn page_selection(&self) -> &str {
        &self.page_selection
    }

    /// Placement strategy actually used. Text stamps always use the quick grid.
    pub fn effective_placement(&self) -> Placement {
        match (self.stamp_type, self.position_mode) {
            (StampType::Image, PositionMode::Custom) => Placement::Custom {
                point: self.custom_point,
            },
            _ => Placement::QuickGrid {
                cell: self.anchor_cell,
                margin: self.margin,
            },
        }
    }

    /// Load parameters from a JSON file. Image payloads are never stored.
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let params = serde_json::from_slice(&bytes)
            .map_err(|e| StampError::Config(format!("Failed to parse stamp config: {}", e)))?;
        Ok(params)
    }

    /// Save parameters to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| StampError::Config(format!("Failed to serialize stamp config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
