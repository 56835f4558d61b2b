//! Lengths, spacing and page sizes.
use serde::{de, Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};
use quire_types::Size;

/// A length that may be absolute, relative to the container or left to layout.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Pt(f32),
    Percent(f32),
    #[default]
    Auto,
}

impl Dimension {
    /// Resolves against the available extent; `Auto` yields `None`.
    pub fn resolve(&self, available: f32) -> Option<f32> {
        match self {
            Dimension::Pt(v) => Some(*v),
            Dimension::Percent(p) => Some(available * p / 100.0),
            Dimension::Auto => None,
        }
    }
}

impl Hash for Dimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Dimension::Pt(v) | Dimension::Percent(v) => v.to_bits().hash(state),
            Dimension::Auto => {}
        }
    }
}

impl Eq for Dimension {}

/// Four-sided spacing used for margins and padding, in points.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Eq for Margins {}

impl Hash for Margins {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for side in [self.top, self.right, self.bottom, self.left] {
            side.to_bits().hash(state);
        }
    }
}

impl Margins {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    pub fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Left and right only
    pub fn horizontal(value: f32) -> Self {
        Self::new(0.0, value, 0.0, value)
    }

    /// Top and bottom only
    pub fn vertical(value: f32) -> Self {
        Self::new(value, 0.0, value, 0.0)
    }

    pub fn horizontal_total(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical_total(&self) -> f32 {
        self.top + self.bottom
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum MarginsDef {
            Str(String),
            Num(f32),
            Map {
                #[serde(default)]
                top: f32,
                #[serde(default)]
                right: f32,
                #[serde(default)]
                bottom: f32,
                #[serde(default)]
                left: f32,
            },
        }

        match MarginsDef::deserialize(deserializer)? {
            MarginsDef::Str(s) => {
                crate::parsers::parse_shorthand_margins(&s).map_err(de::Error::custom)
            }
            MarginsDef::Num(n) => Ok(Margins::all(n)),
            MarginsDef::Map {
                top,
                right,
                bottom,
                left,
            } => Ok(Margins::new(top, right, bottom, left)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

/// Paper size. Named sizes are portrait; apply a [`PageOrientation`] to rotate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl Eq for PageSize {}

impl Hash for PageSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let PageSize::Custom { width, height } = self {
            width.to_bits().hash(state);
            height.to_bits().hash(state);
        }
    }
}

impl PageSize {
    /// Portrait size in points
    pub fn size(&self) -> Size {
        match self {
            PageSize::A4 => Size::new(595.28, 841.89),
            PageSize::A3 => Size::new(841.89, 1190.55),
            PageSize::Letter => Size::new(612.0, 792.0),
            PageSize::Legal => Size::new(612.0, 1008.0),
            PageSize::Custom { width, height } => Size::new(*width, *height),
        }
    }

    pub fn oriented(&self, orientation: PageOrientation) -> Size {
        let size = self.size();
        match orientation {
            PageOrientation::Portrait => size,
            PageOrientation::Landscape => size.rotated(),
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Str(String),
            Map { width: f32, height: f32 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Str(s) => crate::parsers::parse_page_size(&s).map_err(de::Error::custom),
            PageSizeDef::Map { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_resolve() {
        assert_eq!(Dimension::Pt(20.0).resolve(100.0), Some(20.0));
        assert_eq!(Dimension::Percent(50.0).resolve(300.0), Some(150.0));
        assert_eq!(Dimension::Auto.resolve(300.0), None);
    }

    #[test]
    fn test_margins_deserialize_forms() {
        let short: Margins = serde_json::from_str("\"10pt 20pt\"").unwrap();
        let num: Margins = serde_json::from_str("4").unwrap();
        let map: Margins = serde_json::from_str(r#"{"left": 3}"#).unwrap();

        assert_eq!(short, Margins::new(10.0, 20.0, 10.0, 20.0));
        assert_eq!(num, Margins::all(4.0));
        assert_eq!(map, Margins::new(0.0, 0.0, 0.0, 3.0));
    }

    #[test]
    fn test_page_orientation() {
        let landscape = PageSize::A4.oriented(PageOrientation::Landscape);
        assert!(landscape.width > landscape.height);
    }
}
