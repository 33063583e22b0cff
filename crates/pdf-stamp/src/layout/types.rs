//! Layout data types for stamp placement
//!
//! All coordinates are in page units (points) with the origin at the
//! page's top-left corner and `y` growing downward, the same orientation
//! as a normalized drag coordinate.

use crate::types::{AnchorCell, Margin, NormalizedPoint};

/// How a stamp is anchored on the page
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "mode", rename_all = "kebab-case")
)]
pub enum Placement {
    /// Centered on one of nine reference points inset from the page edges
    QuickGrid { cell: AnchorCell, margin: Margin },
    /// Centered on a page-relative point, kept inside the page
    Custom { point: NormalizedPoint },
}

/// Unrotated size of the stamp
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
}

impl BoxSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A rectangular area in page units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on `(cx, cy)`
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Where and how a stamp lands on one page.
///
/// `x`/`y` is the top-left corner of the unrotated box. The box is rotated
/// `rotation_degrees` clockwise (as seen on the page) about its center.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StampGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation_degrees: f32,
}

impl StampGeometry {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Rotation pivot and anchor point
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Axis-aligned extent of the rotated box; a conservative redraw region
    pub fn rotated_bounds(&self) -> Rect {
        let (sin, cos) = self.rotation_degrees.to_radians().sin_cos();
        let width = (self.width * cos).abs() + (self.height * sin).abs();
        let height = (self.width * sin).abs() + (self.height * cos).abs();
        let (cx, cy) = self.center();
        Rect::centered(cx, cy, width, height)
    }

    /// Same placement in a bottom-left origin system (PDF user space).
    ///
    /// `y` becomes the bottom edge of the box and the rotation is expressed
    /// counter-clockwise, as PDF rotation matrices expect.
    pub fn to_bottom_left_origin(&self, page_height: f32) -> StampGeometry {
        StampGeometry {
            y: page_height - self.y - self.height,
            rotation_degrees: -self.rotation_degrees,
            ..*self
        }
    }
}
