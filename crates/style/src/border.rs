use quire_types::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    #[default]
    None,
    Solid,
    Dashed,
    Dotted,
}

/// A uniform border: width in points, line style and colour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Border {
    pub width: f32,
    pub style: BorderStyle,
    pub color: Color,
}

impl Border {
    pub fn solid(width: f32, color: Color) -> Self {
        Self { width, style: BorderStyle::Solid, color }
    }

    /// A border that draws nothing
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.style != BorderStyle::None && self.color.a > 0.0
    }
}
