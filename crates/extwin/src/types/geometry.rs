/*! Geometry types for window bounds, in screen coordinates. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Window rectangle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Bounds {
  pub x: f64,
  pub y: f64,
  pub width: f64,
  pub height: f64,
}

impl Bounds {
  pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  pub const fn position(&self) -> Point {
    Point::new(self.x, self.y)
  }

  pub const fn size(&self) -> Size {
    Size::new(self.width, self.height)
  }

  /// Same size, moved to `position`.
  #[must_use]
  pub const fn with_position(self, position: Point) -> Self {
    Self::new(position.x, position.y, self.width, self.height)
  }

  /// Same position, resized to `size`.
  #[must_use]
  pub const fn with_size(self, size: Size) -> Self {
    Self::new(self.x, self.y, size.width, size.height)
  }

  /// Overlay the fields present in `partial`.
  #[must_use]
  pub fn merge(self, partial: &PartialBounds) -> Self {
    Self {
      x: partial.x.unwrap_or(self.x),
      y: partial.y.unwrap_or(self.y),
      width: partial.width.unwrap_or(self.width),
      height: partial.height.unwrap_or(self.height),
    }
  }

  /// Shrink by frame insets (frame bounds -> content bounds).
  #[must_use]
  pub fn inset(self, insets: Insets) -> Self {
    Self {
      x: self.x + insets.left,
      y: self.y + insets.top,
      width: (self.width - insets.left - insets.right).max(0.0),
      height: (self.height - insets.top - insets.bottom).max(0.0),
    }
  }

  /// Grow by frame insets (content bounds -> frame bounds).
  #[must_use]
  pub fn outset(self, insets: Insets) -> Self {
    Self {
      x: self.x - insets.left,
      y: self.y - insets.top,
      width: self.width + insets.left + insets.right,
      height: self.height + insets.top + insets.bottom,
    }
  }

  /// Position that centers a window of this size inside `area`.
  pub fn centered_in(&self, area: Bounds) -> Point {
    Point::new(
      area.x + ((area.width - self.width) / 2.0).round(),
      area.y + ((area.height - self.height) / 2.0).round(),
    )
  }

  pub fn is_finite(&self) -> bool {
    self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
  }
}

/// Subset of a window rectangle. Absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, TS)]
#[serde(default)]
#[ts(export)]
pub struct PartialBounds {
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub x: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub y: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub width: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub height: Option<f64>,
}

impl PartialBounds {
  pub const fn position(point: Point) -> Self {
    Self {
      x: Some(point.x),
      y: Some(point.y),
      width: None,
      height: None,
    }
  }

  pub const fn size(size: Size) -> Self {
    Self {
      x: None,
      y: None,
      width: Some(size.width),
      height: Some(size.height),
    }
  }

  pub const fn is_empty(&self) -> bool {
    self.x.is_none() && self.y.is_none() && self.width.is_none() && self.height.is_none()
  }
}

impl From<Bounds> for PartialBounds {
  fn from(b: Bounds) -> Self {
    Self {
      x: Some(b.x),
      y: Some(b.y),
      width: Some(b.width),
      height: Some(b.height),
    }
  }
}

/// A 2D point in screen coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }
}

/// Window size.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Size {
  pub width: f64,
  pub height: f64,
}

impl Size {
  pub const fn new(width: f64, height: f64) -> Self {
    Self { width, height }
  }
}

/// Minimum or maximum size. Either dimension may be unconstrained.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, TS)]
#[serde(default)]
#[ts(export)]
pub struct SizeLimit {
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub width: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub height: Option<f64>,
}

impl SizeLimit {
  pub const fn new(width: Option<f64>, height: Option<f64>) -> Self {
    Self { width, height }
  }

  pub const fn is_unset(&self) -> bool {
    self.width.is_none() && self.height.is_none()
  }

  /// Clamp `size` into `[min, max]`. Unset components don't constrain.
  pub fn clamp(size: Size, min: SizeLimit, max: SizeLimit) -> Size {
    fn clamp_one(v: f64, lo: Option<f64>, hi: Option<f64>) -> f64 {
      let v = hi.map_or(v, |hi| v.min(hi));
      lo.map_or(v, |lo| v.max(lo))
    }
    Size::new(
      clamp_one(size.width, min.width, max.width),
      clamp_one(size.height, min.height, max.height),
    )
  }
}

/// Distance between the window frame and its content area.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Insets {
  pub top: f64,
  pub left: f64,
  pub bottom: f64,
  pub right: f64,
}

impl Insets {
  pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
    Self {
      top,
      left,
      bottom,
      right,
    }
  }

  /// Title bar only.
  pub const fn title_bar(height: f64) -> Self {
    Self::new(height, 0.0, 0.0, 0.0)
  }
}
