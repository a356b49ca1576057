use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Screen-space rectangle with `x1 <= x2` and `y1 <= y2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl SelectionRect {
    /// Build from two arbitrary corners, normalizing each axis
    pub fn from_corners(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

impl fmt::Display for SelectionRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) to ({}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Bounds of the virtual desktop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenBounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// Smallest size a result window may take
pub const MIN_WINDOW_WIDTH: i32 = 100;
pub const MIN_WINDOW_HEIGHT: i32 = 50;

/// Position and size of a window, written as `WxH+X+Y`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowGeometry {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

impl fmt::Display for WindowGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid window geometry '{0}', expected WxH+X+Y")]
pub struct GeometryParseError(pub String);

impl FromStr for WindowGeometry {
    type Err = GeometryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || GeometryParseError(s.to_string());
        let s = s.trim();

        let (width, rest) = s.split_once('x').ok_or_else(err)?;
        let offset_start = rest.find(['+', '-']).ok_or_else(err)?;
        let (height, offsets) = rest.split_at(offset_start);

        let (x, offsets) = parse_offset(offsets).ok_or_else(err)?;
        let (y, tail) = parse_offset(offsets).ok_or_else(err)?;
        if !tail.is_empty() {
            return Err(err());
        }

        Ok(Self {
            x,
            y,
            width: width.parse().map_err(|_| err())?,
            height: height.parse().map_err(|_| err())?,
        })
    }
}

/// Parse one `+N`, `-N` or `+-N` offset, returning the value and the remainder
fn parse_offset(s: &str) -> Option<(i32, &str)> {
    let (negative, s) = match s.strip_prefix('+') {
        Some(rest) => match rest.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, rest),
        },
        None => (true, s.strip_prefix('-')?),
    };

    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value: i32 = s[..end].parse().ok()?;
    Some((if negative { -value } else { value }, &s[end..]))
}
