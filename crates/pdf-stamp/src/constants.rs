//! Shared constants for stamp layout
//!
//! This module centralizes magic numbers used by the placement engine
//! and the parameter model.

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Quick Grid
// =============================================================================

/// Inset factors for small, medium, large and x-large margins.
/// Multiplied by the mean of page width and height.
pub const MARGIN_FACTORS: [f32; 4] = [0.02, 0.035, 0.05, 0.075];

// =============================================================================
// Numeric Parameter Ranges
// =============================================================================

/// Smallest accepted font size / image height
pub const MIN_FONT_SIZE: f32 = 1.0;

/// Largest accepted font size / image height
pub const MAX_FONT_SIZE: f32 = 400.0;

/// Rotation bounds in degrees
pub const MIN_ROTATION: f32 = -180.0;
pub const MAX_ROTATION: f32 = 180.0;

/// Opacity bounds in percent
pub const MIN_OPACITY: f32 = 0.0;
pub const MAX_OPACITY: f32 = 100.0;

/// Opacity of a freshly created stamp (percent)
pub const DEFAULT_OPACITY: f32 = 50.0;

// =============================================================================
// Text Metrics
// =============================================================================

/// Approximate character width ratio for Latin sans-serif faces
pub const LATIN_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Approximate character width ratio for Arabic and Thai faces
pub const COMPLEX_SCRIPT_CHAR_WIDTH_RATIO: f32 = 0.6;

/// CJK glyphs are full width
pub const CJK_CHAR_WIDTH_RATIO: f32 = 1.0;

/// Line height as a multiple of the font size
pub const LINE_HEIGHT_RATIO: f32 = 1.0;
