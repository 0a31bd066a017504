//! Canvas-local geometry: clamping and edge resizing.
//!
//! Everything here is pure. Widget boxes are whole pixels; pointer input arrives as
//! `kurbo` points and vectors and is rounded at the boundary.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest width or height a widget may be resized to.
pub const MIN_WIDGET_SIZE: i32 = 20;
/// Largest width or height a widget may be resized to.
pub const MAX_WIDGET_SIZE: i32 = 2000;
/// Width of the margin along a widget's box that starts a resize instead of a drag.
pub const BORDER_BAND: f64 = 8.0;

/// Position and size of a widget in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The box as a kurbo rectangle.
    pub fn as_rect(&self) -> Rect {
        let x = self.x as f64;
        let y = self.y as f64;
        Rect::new(x, y, x + self.width as f64, y + self.height as f64)
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// Check if a canvas point lies inside the box (edges included).
    pub fn contains(&self, point: Point) -> bool {
        let rect = self.as_rect();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
    }

    /// Convert a canvas point into box-local coordinates.
    pub fn to_local(&self, point: Point) -> Point {
        point - self.origin().to_vec2()
    }

    /// Whether the whole box lies on the canvas.
    pub fn fits_within(&self, canvas: CanvasSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && i64::from(self.x) + i64::from(self.width) <= i64::from(canvas.width)
            && i64::from(self.y) + i64::from(self.height) <= i64::from(canvas.height)
    }
}

/// Width and height of a widget, used for registry defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(100, 80)
    }
}

/// Dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: i32,
    pub height: i32,
}

impl CanvasSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Per-axis size bounds for a widget kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    pub min: i32,
    pub max: i32,
}

impl SizeLimits {
    pub const DEFAULT: SizeLimits = SizeLimits {
        min: MIN_WIDGET_SIZE,
        max: MAX_WIDGET_SIZE,
    };

    fn apply(&self, size: i32) -> i32 {
        size.clamp(self.min, self.max)
    }

    /// Lower the maximum to `extent` so the size fits the canvas, never below the minimum.
    fn within(&self, extent: i32) -> SizeLimits {
        SizeLimits {
            min: self.min,
            max: self.max.min(extent).max(self.min),
        }
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Vertical edge of a widget box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertical {
    North,
    South,
}

/// Horizontal edge of a widget box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizontal {
    East,
    West,
}

/// Which edges a resize gesture moves. Both axes empty means no resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResizeDirection {
    pub vertical: Option<Vertical>,
    pub horizontal: Option<Horizontal>,
}

impl ResizeDirection {
    pub const NONE: ResizeDirection = ResizeDirection {
        vertical: None,
        horizontal: None,
    };

    pub fn new(vertical: Option<Vertical>, horizontal: Option<Horizontal>) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    pub fn is_none(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }
}

impl fmt::Display for ResizeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vertical {
            Some(Vertical::North) => f.write_str("n")?,
            Some(Vertical::South) => f.write_str("s")?,
            None => {}
        }
        match self.horizontal {
            Some(Horizontal::East) => f.write_str("e"),
            Some(Horizontal::West) => f.write_str("w"),
            None => Ok(()),
        }
    }
}

/// Error returned when parsing a compass string that is not a resize direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid resize direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for ResizeDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars().peekable();
        let vertical = match chars.peek() {
            Some('n') => {
                chars.next();
                Some(Vertical::North)
            }
            Some('s') => {
                chars.next();
                Some(Vertical::South)
            }
            _ => None,
        };
        let horizontal = match chars.next() {
            Some('e') => Some(Horizontal::East),
            Some('w') => Some(Horizontal::West),
            None => None,
            Some(_) => return Err(ParseDirectionError(s.to_string())),
        };
        if chars.next().is_some() || (vertical.is_none() && horizontal.is_none()) {
            return Err(ParseDirectionError(s.to_string()));
        }
        Ok(Self::new(vertical, horizontal))
    }
}

/// Clamp a widget origin so its whole box stays on the canvas.
///
/// A widget larger than the canvas is pinned to the origin on that axis and overflows the
/// far edge.
pub fn clamp_position(
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    canvas_width: i32,
    canvas_height: i32,
) -> (i32, i32) {
    (
        x.min(canvas_width.saturating_sub(width)).max(0),
        y.min(canvas_height.saturating_sub(height)).max(0),
    )
}

/// Round a pointer delta to whole pixels.
pub fn pixel_delta(delta: Vec2) -> (i32, i32) {
    (delta.x.round() as i32, delta.y.round() as i32)
}

/// Compute the geometry produced by dragging the given edges by `delta` from `start`.
///
/// Far edges (east, south) change only the size. Near edges (west, north) change the size by
/// the negated delta and move the origin so the opposite edge stays put. Sizes are held to
/// `limits` per axis and never exceed the canvas; once a limit is hit the origin stops moving
/// on that axis.
pub fn resize_from_edge(
    direction: ResizeDirection,
    delta: Vec2,
    start: Geometry,
    limits: SizeLimits,
    canvas: CanvasSize,
) -> Geometry {
    let (dx, dy) = pixel_delta(delta);
    let horizontal_limits = limits.within(canvas.width);
    let vertical_limits = limits.within(canvas.height);
    let mut next = start;

    match direction.horizontal {
        Some(Horizontal::East) => {
            next.width = horizontal_limits.apply(start.width.saturating_add(dx));
        }
        Some(Horizontal::West) => {
            next.width = horizontal_limits.apply(start.width.saturating_sub(dx));
            next.x = start.x.saturating_add(start.width.saturating_sub(next.width));
        }
        None => {}
    }
    match direction.vertical {
        Some(Vertical::South) => {
            next.height = vertical_limits.apply(start.height.saturating_add(dy));
        }
        Some(Vertical::North) => {
            next.height = vertical_limits.apply(start.height.saturating_sub(dy));
            next.y = start.y.saturating_add(start.height.saturating_sub(next.height));
        }
        None => {}
    }

    let (x, y) = clamp_position(
        next.x,
        next.y,
        next.width,
        next.height,
        canvas.width,
        canvas.height,
    );
    next.x = x;
    next.y = y;
    next
}

/// Find which edges of a `width` x `height` box lie within `band` of a box-local point.
///
/// Returns `None` when the point is in the interior, i.e. a drag rather than a resize.
pub fn border_direction(local: Point, width: f64, height: f64, band: f64) -> Option<ResizeDirection> {
    let on_edge =
        local.x <= band || local.y <= band || local.x >= width - band || local.y >= height - band;
    if !on_edge {
        return None;
    }

    let vertical = if local.y <= band {
        Some(Vertical::North)
    } else if local.y >= height - band {
        Some(Vertical::South)
    } else {
        None
    };
    let horizontal = if local.x <= band {
        Some(Horizontal::West)
    } else if local.x >= width - band {
        Some(Horizontal::East)
    } else {
        None
    };
    Some(ResizeDirection::new(vertical, horizontal))
}
