use crate::capability::Capabilities;
use crate::component::{Component, COMPONENT_LAYER};
use crate::context::RenderContext;
use crate::error::Result;
use crate::tree::ComponentTree;
use quire_style::{Style, StyleLayer};
use quire_traits::{GraphicsPath, ObjectReference, RenderWriter};
use quire_types::{ComponentId, ObjectType, Point, Rect, Size};

static SHAPE_LAYER: StyleLayer = StyleLayer::extends(&COMPONENT_LAYER, "shape", |style| style);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Line,
    Polygon,
}

/// A drawn outline. Rectangles fill the available size; lines and polygons
/// use their explicit points, a line without points runs corner to corner.
#[derive(Debug)]
pub struct Shape {
    kind: ShapeKind,
    points: Vec<Point>,
}

impl Shape {
    pub fn rectangle() -> Self {
        Self {
            kind: ShapeKind::Rectangle,
            points: Vec::new(),
        }
    }

    pub fn line(from: Point, to: Point) -> Self {
        Self {
            kind: ShapeKind::Line,
            points: vec![from, to],
        }
    }

    pub fn polygon(points: Vec<Point>) -> Self {
        Self {
            kind: ShapeKind::Polygon,
            points,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }
}

fn available_size(style: &Style) -> Size {
    let width = style.width.and_then(|w| w.resolve(0.0)).unwrap_or(0.0);
    let height = style.height.and_then(|h| h.resolve(0.0)).unwrap_or(0.0);
    Size::new(width, height)
}

impl Component for Shape {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("shape")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::SHAPE | Capabilities::BINDABLE
    }

    fn style_layer(&self) -> &'static StyleLayer {
        &SHAPE_LAYER
    }

    fn create_path(&self, available: Size, _style: &Style) -> Option<GraphicsPath> {
        let mut path = GraphicsPath::new();
        match self.kind {
            ShapeKind::Rectangle => {
                path.rect(Rect::from_size(available));
            }
            ShapeKind::Line => {
                let (from, to) = match self.points.as_slice() {
                    [from, to, ..] => (*from, *to),
                    _ => (Point::new(0.0, 0.0), Point::new(available.width, available.height)),
                };
                path.move_to(from).line_to(to);
            }
            ShapeKind::Polygon => {
                let [first, rest @ ..] = self.points.as_slice() else {
                    return None;
                };
                if rest.len() < 2 {
                    return None;
                }
                path.move_to(*first);
                for point in rest {
                    path.line_to(*point);
                }
                path.close();
            }
        }
        Some(path)
    }

    fn output_to_target(
        &mut self,
        tree: &ComponentTree,
        id: ComponentId,
        ctx: &mut RenderContext<'_>,
        writer: &mut dyn RenderWriter,
    ) -> Result<Option<ObjectReference>> {
        let style = ctx.styles.full_style(tree, id, ctx.base.stylesheet)?;
        match self.create_path(available_size(&style), &style) {
            Some(path) => Ok(Some(writer.write_path(&path, &style)?)),
            None => Ok(None),
        }
    }
}
