//! Output-side collaborator interfaces.
//!
//! The page-description writer is external. Components describe what they
//! draw through [`RenderWriter`] and receive an [`ObjectReference`] for every
//! object the writer emits.

use quire_style::Style;
use quire_types::{Point, Rect};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Writer error: {0}")]
    Writer(String),

    #[error("Unsupported content: {0}")]
    Unsupported(String),
}

/// Reference to an object emitted by the writer (generation is always 0 for new objects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectReference {
    pub number: u32,
    pub generation: u16,
}

impl ObjectReference {
    pub fn new(number: u32) -> Self {
        Self { number, generation: 0 }
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    Rect(Rect),
    Close,
}

/// A sequence of drawing operations in page units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphicsPath {
    ops: Vec<PathOp>,
}

impl GraphicsPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.ops.push(PathOp::MoveTo(point));
        self
    }

    pub fn line_to(&mut self, point: Point) -> &mut Self {
        self.ops.push(PathOp::LineTo(point));
        self
    }

    pub fn rect(&mut self, rect: Rect) -> &mut Self {
        self.ops.push(PathOp::Rect(rect));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.ops.push(PathOp::Close);
        self
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Smallest rectangle containing every point of the path.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = Vec::new();
        for op in &self.ops {
            match op {
                PathOp::MoveTo(p) | PathOp::LineTo(p) => points.push(*p),
                PathOp::Rect(r) => {
                    points.push(r.origin());
                    points.push(Point::new(r.right(), r.bottom()));
                }
                PathOp::Close => {}
            }
        }
        let first = points.first()?;
        let (mut min, mut max) = (*first, *first);
        for p in &points[1..] {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

/// The writer components render into.
pub trait RenderWriter {
    /// Emits a filled and/or stroked path according to `style`.
    fn write_path(
        &mut self,
        path: &GraphicsPath,
        style: &Style,
    ) -> Result<ObjectReference, RenderError>;

    fn write_text(&mut self, text: &str, style: &Style) -> Result<ObjectReference, RenderError>;

    /// Emits image data previously loaded from `source`.
    fn write_image(
        &mut self,
        source: &str,
        data: &[u8],
        style: &Style,
    ) -> Result<ObjectReference, RenderError>;

    /// Opens a marked group (e.g. for a component with an outline entry).
    fn begin_group(&mut self, _name: &str) -> Result<(), RenderError> {
        Ok(())
    }

    fn end_group(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_bounds() {
        let mut path = GraphicsPath::new();
        path.move_to(Point::new(10.0, 5.0))
            .line_to(Point::new(40.0, 25.0))
            .line_to(Point::new(0.0, 30.0))
            .close();

        assert_eq!(path.bounds(), Some(Rect::new(0.0, 5.0, 40.0, 25.0)));
        assert_eq!(path.ops().len(), 4);
    }

    #[test]
    fn test_empty_path_has_no_bounds() {
        assert_eq!(GraphicsPath::new().bounds(), None);
    }

    #[test]
    fn test_object_reference_display() {
        assert_eq!(ObjectReference::new(12).to_string(), "12 0 R");
    }
}
