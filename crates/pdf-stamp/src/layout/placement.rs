//! Stamp placement on a page
//!
//! This module turns a [`Placement`] and a stamp box size into final
//! [`StampGeometry`], accounting for:
//! - Margin insets for quick-grid anchors
//! - Keeping custom-positioned stamps inside the page
//! - Rotation about the box center

use crate::params::StampParameters;
use crate::types::{AnchorCell, Margin, NormalizedPoint, PageSize, StampType};
use crate::validate::ValidationError;

use super::{BoxSize, Placement, StampGeometry, TextMetrics};

/// Place the stamp described by `params` on a page of the given size.
///
/// Fails only when the record has nothing to draw for its stamp type.
pub fn place<M>(
    params: &StampParameters,
    page: PageSize,
    metrics: &M,
) -> Result<StampGeometry, ValidationError>
where
    M: TextMetrics + ?Sized,
{
    let size = stamp_box_size(params, metrics)?;
    Ok(place_box(
        &params.effective_placement(),
        size,
        params.rotation(),
        page,
    ))
}

/// Unrotated box size of the stamp.
///
/// Text: measured at the font size. Image: font size is the box height and
/// the width follows the image's native aspect ratio.
pub fn stamp_box_size<M>(params: &StampParameters, metrics: &M) -> Result<BoxSize, ValidationError>
where
    M: TextMetrics + ?Sized,
{
    let font_size = params.font_size();
    match params.stamp_type() {
        StampType::Text => {
            let text = params.stamp_text().trim();
            if text.is_empty() {
                return Err(ValidationError::MissingText);
            }
            Ok(metrics.measure(text, params.alphabet(), font_size))
        }
        StampType::Image => {
            let aspect = params
                .stamp_image()
                .filter(|img| img.is_present())
                .and_then(|img| img.aspect_ratio())
                .ok_or(ValidationError::MissingImage)?;
            Ok(BoxSize::new(font_size * aspect, font_size))
        }
    }
}

/// Position a box of `size` according to `placement`.
///
/// Rotation does not move the box: it turns about the anchor point.
pub fn place_box(
    placement: &Placement,
    size: BoxSize,
    rotation_degrees: f32,
    page: PageSize,
) -> StampGeometry {
    let (cx, cy) = match *placement {
        Placement::QuickGrid { cell, margin } => anchor_point(cell, margin, page),
        Placement::Custom { point } => custom_center(point, size, page),
    };

    StampGeometry {
        x: cx - size.width / 2.0,
        y: cy - size.height / 2.0,
        width: size.width,
        height: size.height,
        rotation_degrees: normalize_rotation(rotation_degrees),
    }
}

/// Reference point of a quick-grid cell, inset from the edges by the margin
pub fn anchor_point(cell: AnchorCell, margin: Margin, page: PageSize) -> (f32, f32) {
    let inset = margin.inset(page);
    let (col, row) = cell.grid_position();

    let along = |index: usize, extent: f32| match index {
        0 => inset,
        1 => extent / 2.0,
        _ => extent - inset,
    };

    (along(col, page.width), along(row, page.height))
}

/// Center for a custom point, moved just enough to keep the box on the page
fn custom_center(point: NormalizedPoint, size: BoxSize, page: PageSize) -> (f32, f32) {
    let point = point.clamped();
    (
        clamp_axis(point.x * page.width, size.width, page.width),
        clamp_axis(point.y * page.height, size.height, page.height),
    )
}

fn clamp_axis(center: f32, extent: f32, page_extent: f32) -> f32 {
    let half = extent / 2.0;
    if extent >= page_extent {
        // Cannot fit; center it so it overflows evenly
        page_extent / 2.0
    } else {
        center.clamp(half, page_extent - half)
    }
}

/// Map any angle into (-180, 180]
pub fn normalize_rotation(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
