//! Checks that a parameter record can produce a stamp

use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::constants::*;
use crate::params::StampParameters;
use crate::selection::{SelectionError, select_pages};
use crate::types::StampType;

/// Numeric parameters with a declared range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    FontSize,
    Rotation,
    Opacity,
}

impl NumericField {
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            NumericField::FontSize => MIN_FONT_SIZE..=MAX_FONT_SIZE,
            NumericField::Rotation => MIN_ROTATION..=MAX_ROTATION,
            NumericField::Opacity => MIN_OPACITY..=MAX_OPACITY,
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumericField::FontSize => "font size",
            NumericField::Rotation => "rotation",
            NumericField::Opacity => "opacity",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Stamp text is empty")]
    MissingText,
    #[error("No stamp image selected")]
    MissingImage,
    #[error("{field} {value} is outside {}..={}", .field.range().start(), .field.range().end())]
    OutOfRangeNumeric { field: NumericField, value: f32 },
    #[error("Invalid page selection: {0}")]
    BadSelection(#[from] SelectionError),
}

/// Validate `params` for a document with `total_pages` pages.
///
/// Rules are checked in a fixed order and the first violation is reported:
/// text present, image present, numeric ranges, then page selection.
/// A blank page selection passes; callers treat it as every page.
pub fn validate(params: &StampParameters, total_pages: u32) -> Result<(), ValidationError> {
    match params.stamp_type() {
        StampType::Text if params.stamp_text().trim().is_empty() => {
            return Err(ValidationError::MissingText);
        }
        StampType::Image if !params.stamp_image().is_some_and(|img| img.is_present()) => {
            return Err(ValidationError::MissingImage);
        }
        _ => {}
    }

    check_range(NumericField::FontSize, params.font_size())?;
    check_range(NumericField::Rotation, params.rotation())?;
    check_range(NumericField::Opacity, params.opacity())?;

    let selection = params.page_selection();
    if !selection.trim().is_empty() {
        select_pages(selection, total_pages)?;
    }

    Ok(())
}

fn check_range(field: NumericField, value: f32) -> Result<(), ValidationError> {
    // NaN fails `contains`
    if field.range().contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRangeNumeric { field, value })
    }
}
