/*!
Argument validation.

Runs synchronously before anything is queued, so invalid input never reaches
the native bridge.
*/

use crate::types::{
  PartialBounds, Point, SizeLimit, WindowError, WindowProperties, WindowResult, WindowUpdate,
};

pub(crate) fn opacity(value: f64) -> WindowResult<f64> {
  if (0.0..=1.0).contains(&value) {
    Ok(value)
  } else {
    Err(WindowError::invalid(format!(
      "opacity must be within [0, 1], got {value}"
    )))
  }
}

pub(crate) fn dimension(name: &str, value: f64) -> WindowResult<f64> {
  if value.is_finite() && value >= 0.0 {
    Ok(value)
  } else {
    Err(WindowError::invalid(format!(
      "{name} must be a finite, non-negative number, got {value}"
    )))
  }
}

pub(crate) fn coordinate(name: &str, value: f64) -> WindowResult<f64> {
  if value.is_finite() {
    Ok(value)
  } else {
    Err(WindowError::invalid(format!("{name} must be finite, got {value}")))
  }
}

pub(crate) fn point(p: Point) -> WindowResult<Point> {
  coordinate("x", p.x)?;
  coordinate("y", p.y)?;
  Ok(p)
}

pub(crate) fn partial_bounds(b: &PartialBounds) -> WindowResult<()> {
  if let Some(x) = b.x {
    coordinate("x", x)?;
  }
  if let Some(y) = b.y {
    coordinate("y", y)?;
  }
  if let Some(w) = b.width {
    dimension("width", w)?;
  }
  if let Some(h) = b.height {
    dimension("height", h)?;
  }
  Ok(())
}

fn limit(name: &str, l: SizeLimit) -> WindowResult<()> {
  if let Some(w) = l.width {
    dimension(&format!("{name} width"), w)?;
  }
  if let Some(h) = l.height {
    dimension(&format!("{name} height"), h)?;
  }
  Ok(())
}

/// Both limits well-formed, and each minimum within its maximum.
pub(crate) fn size_limits(min: SizeLimit, max: SizeLimit) -> WindowResult<()> {
  limit("minimum", min)?;
  limit("maximum", max)?;
  let exceeds = |lo: Option<f64>, hi: Option<f64>| matches!((lo, hi), (Some(lo), Some(hi)) if lo > hi);
  if exceeds(min.width, max.width) || exceeds(min.height, max.height) {
    return Err(WindowError::invalid(format!(
      "minimum size {min:?} exceeds maximum size {max:?}"
    )));
  }
  Ok(())
}

/// Non-positive ratios mean "unset".
pub(crate) fn aspect_ratio(ratio: Option<f64>) -> WindowResult<Option<f64>> {
  match ratio {
    Some(r) if !r.is_finite() => Err(WindowError::invalid(format!(
      "aspect ratio must be finite, got {r}"
    ))),
    Some(r) if r <= 0.0 => Ok(None),
    other => Ok(other),
  }
}

/// CSS-style color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`,
/// `hsl()`, `hsla()` or a named color.
pub(crate) fn color(value: &str) -> WindowResult<()> {
  let value = value.trim();
  let valid = if let Some(hex) = value.strip_prefix('#') {
    matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
  } else if let Some(open) = value.find('(') {
    let func = value.get(..open).unwrap_or_default().to_ascii_lowercase();
    let args = value
      .get(open + 1..)
      .and_then(|rest| rest.strip_suffix(')'))
      .unwrap_or_default();
    matches!(func.as_str(), "rgb" | "rgba" | "hsl" | "hsla")
      && !args.trim().is_empty()
      && args
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '%' | ',' | ' ' | '-' | '/'))
  } else {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
  };

  if valid {
    Ok(())
  } else {
    Err(WindowError::invalid(format!("invalid color {value:?}")))
  }
}

fn exclusive_modes(maximized: Option<bool>, fullscreen: Option<bool>) -> WindowResult<()> {
  if maximized == Some(true) && fullscreen == Some(true) {
    return Err(WindowError::invalid(
      "a window cannot be maximized and fullscreen at once",
    ));
  }
  Ok(())
}

/// Shape checks for `create`. Parent existence is checked by the caller.
pub(crate) fn properties(p: &WindowProperties) -> WindowResult<()> {
  if let Some(w) = p.width {
    dimension("width", w)?;
  }
  if let Some(h) = p.height {
    dimension("height", h)?;
  }
  if let Some(pos) = p.position {
    point(pos)?;
  }
  if let Some(pos) = p.title_buttons_position {
    point(pos)?;
  }
  size_limits(
    SizeLimit::new(p.min_width, p.min_height),
    SizeLimit::new(p.max_width, p.max_height),
  )?;
  if let Some(o) = p.opacity {
    opacity(o)?;
  }
  if let Some(c) = &p.background_color {
    color(c)?;
  }
  aspect_ratio(p.aspect_ratio)?;
  exclusive_modes(p.maximized, p.fullscreen)?;
  if p.modal == Some(true) && p.parent.is_none() {
    return Err(WindowError::invalid("a modal window needs a parent"));
  }
  Ok(())
}

/// Shape checks for `update`. Limits are checked again against the current
/// record when the update runs.
pub(crate) fn update(u: &WindowUpdate) -> WindowResult<()> {
  if let Some(w) = u.width {
    dimension("width", w)?;
  }
  if let Some(h) = u.height {
    dimension("height", h)?;
  }
  if let Some(pos) = u.position {
    point(pos)?;
  }
  if let Some(pos) = u.title_buttons_position {
    point(pos)?;
  }
  size_limits(
    SizeLimit::new(u.min_width, u.min_height),
    SizeLimit::new(u.max_width, u.max_height),
  )?;
  if let Some(o) = u.opacity {
    opacity(o)?;
  }
  if let Some(c) = &u.background_color {
    color(c)?;
  }
  if let Some(ratio) = u.aspect_ratio {
    aspect_ratio(ratio)?;
  }
  exclusive_modes(u.maximized, u.fullscreen)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::WindowId;

  #[test]
  fn opacity_range_is_inclusive() {
    assert!(opacity(0.0).is_ok());
    assert!(opacity(1.0).is_ok());
    assert!(opacity(1.01).is_err());
    assert!(opacity(-0.1).is_err());
    assert!(opacity(f64::NAN).is_err());
  }

  #[test]
  fn colors() {
    for ok in ["#fff", "#FFFFFF", "#00000080", "rgb(1, 2, 3)", "rgba(0,0,0,0.5)", "hsl(120, 50%, 50%)", "red"] {
      assert!(color(ok).is_ok(), "{ok}");
    }
    for bad in ["", "#ff", "#ggg", "rgb()", "cmyk(1,2,3,4)", "red;", "#1234567"] {
      assert!(color(bad).is_err(), "{bad}");
    }
  }

  #[test]
  fn min_must_not_exceed_max() {
    let min = SizeLimit::new(Some(500.0), None);
    assert!(size_limits(min, SizeLimit::new(Some(400.0), None)).is_err());
    assert!(size_limits(min, SizeLimit::new(None, Some(10.0))).is_ok());
    assert!(size_limits(min, SizeLimit::new(Some(500.0), None)).is_ok());
  }

  #[test]
  fn aspect_ratio_non_positive_unsets() {
    assert_eq!(aspect_ratio(Some(0.0)).ok(), Some(None));
    assert_eq!(aspect_ratio(Some(-1.0)).ok(), Some(None));
    assert_eq!(aspect_ratio(Some(1.5)).ok(), Some(Some(1.5)));
    assert!(aspect_ratio(Some(f64::INFINITY)).is_err());
  }

  #[test]
  fn modal_requires_parent() {
    let orphan = WindowProperties {
      modal: Some(true),
      ..WindowProperties::default()
    };
    assert!(properties(&orphan).is_err());

    let child = WindowProperties {
      modal: Some(true),
      parent: Some(WindowId::from("window-1")),
      ..WindowProperties::default()
    };
    assert!(properties(&child).is_ok());
  }

  #[test]
  fn maximized_and_fullscreen_are_exclusive() {
    let both = WindowUpdate {
      maximized: Some(true),
      fullscreen: Some(true),
      ..WindowUpdate::default()
    };
    assert!(matches!(update(&both), Err(WindowError::InvalidArgument(_))));
  }

  #[test]
  fn bounds_must_be_finite_and_non_negative() {
    assert!(partial_bounds(&PartialBounds {
      width: Some(-1.0),
      ..PartialBounds::default()
    })
    .is_err());
    assert!(partial_bounds(&PartialBounds {
      x: Some(-100.0),
      ..PartialBounds::default()
    })
    .is_ok());
    assert!(partial_bounds(&PartialBounds {
      y: Some(f64::NAN),
      ..PartialBounds::default()
    })
    .is_err());
  }
}
