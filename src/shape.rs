//! Shape model: the drawable record tools create and mutate, and its sparse
//! update type.
//!
//! Shapes are owned by the host's store; tools only build new ones and send
//! patches. Both types serialize with camelCase keys so they can be handed to
//! a browser store unchanged.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ShapeStyle;
use crate::geometry::{Bounds, Point};

/// Unique identifier for a shape.
pub type ShapeId = String;

/// Allocate a fresh id with the given prefix, e.g. `rect-1b4e...`.
#[must_use]
pub fn new_shape_id(prefix: &str) -> ShapeId {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// The kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
}

/// A shape as stored by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Left edge in world coordinates.
    pub x: f64,
    /// Top edge in world coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    pub opacity: f64,
    pub stroke_color: String,
    pub fill_color: String,
    pub stroke_width: f64,
}

impl Shape {
    /// Zero-sized rectangle anchored at `origin`.
    #[must_use]
    pub fn rectangle(id: ShapeId, origin: Point, style: &ShapeStyle) -> Self {
        Self {
            id,
            kind: ShapeKind::Rectangle,
            x: origin.x,
            y: origin.y,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            opacity: style.opacity,
            stroke_color: style.stroke_color.clone(),
            fill_color: style.fill_color.clone(),
            stroke_width: style.stroke_width,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds { x: self.x, y: self.y, width: self.width, height: self.height }
    }

    /// Apply a sparse update in place.
    pub fn apply(&mut self, patch: &ShapePatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
        if let Some(r) = patch.rotation {
            self.rotation = r;
        }
        if let Some(o) = patch.opacity {
            self.opacity = o;
        }
        if let Some(ref c) = patch.stroke_color {
            self.stroke_color.clone_from(c);
        }
        if let Some(ref c) = patch.fill_color {
            self.fill_color.clone_from(c);
        }
        if let Some(w) = patch.stroke_width {
            self.stroke_width = w;
        }
    }
}

/// Sparse update for a shape. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl ShapePatch {
    /// Move to `position`, leaving size untouched.
    #[must_use]
    pub fn position(position: Point) -> Self {
        Self { x: Some(position.x), y: Some(position.y), ..Default::default() }
    }

    /// Replace position and size.
    #[must_use]
    pub fn bounds(bounds: Bounds) -> Self {
        Self {
            x: Some(bounds.x),
            y: Some(bounds.y),
            width: Some(bounds.width),
            height: Some(bounds.height),
            ..Default::default()
        }
    }
}
