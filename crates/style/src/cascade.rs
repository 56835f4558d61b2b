//! Base styles and full-style resolution.
//!
//! Each component type owns a static [`StyleLayer`] naming the layer it
//! extends. The framework walks that chain from the root outward, feeding a
//! fresh [`Style`] through every layer's transform, so a type cannot drop the
//! defaults contributed by the types it builds on.

use crate::style::Style;
use std::fmt;

/// A pure transform contributing one type's defaults.
pub type StyleTransform = fn(Style) -> Style;

pub struct StyleLayer {
    name: &'static str,
    parent: Option<&'static StyleLayer>,
    transform: StyleTransform,
}

impl StyleLayer {
    /// A layer with no parent. Usually there is exactly one of these.
    pub const fn root(name: &'static str, transform: StyleTransform) -> Self {
        Self {
            name,
            parent: None,
            transform,
        }
    }

    /// A layer applied on top of `parent`
    pub const fn extends(
        parent: &'static StyleLayer,
        name: &'static str,
        transform: StyleTransform,
    ) -> Self {
        Self {
            name,
            parent: Some(parent),
            transform,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<&'static StyleLayer> {
        self.parent
    }

    /// Layers from the root down to and including `self`.
    pub fn chain(&self) -> Vec<&StyleLayer> {
        let mut chain = vec![self];
        let mut current = self.parent;
        while let Some(layer) = current {
            chain.push(layer);
            current = layer.parent;
        }
        chain.reverse();
        chain
    }

    pub fn depth(&self) -> usize {
        self.chain().len() - 1
    }

    /// True when `ancestor` is `self` or appears in its chain.
    pub fn extends_layer(&self, ancestor: &StyleLayer) -> bool {
        self.chain().into_iter().any(|layer| std::ptr::eq(layer, ancestor))
    }

    /// Builds a new base style by applying every layer, root first.
    ///
    /// Each call starts from an empty style, so callers may mutate the result freely.
    pub fn base_style(&self) -> Style {
        self.chain()
            .into_iter()
            .fold(Style::default(), |style, layer| (layer.transform)(style))
    }
}

impl fmt::Debug for StyleLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.chain().iter().map(|layer| layer.name).collect();
        write!(f, "StyleLayer({})", names.join(" > "))
    }
}

/// Leaves the style untouched, for types that add no defaults of their own.
pub fn no_defaults(style: Style) -> Style {
    style
}

/// Combines a base style, declared styles (lowest priority first) and the
/// parent's full style into a component's full style.
pub fn resolve_full_style(base: Style, declared: &[&Style], parent_full: Option<&Style>) -> Style {
    let mut full = declared
        .iter()
        .fold(base, |style, layer| style.merged(layer));
    if let Some(parent) = parent_full {
        full.inherit_from(parent);
    }
    full
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontStyle;
    use crate::position::{DisplayMode, PositionMode};

    fn level0(style: Style) -> Style {
        style.with_font_size(8.0).with_position(PositionMode::Static)
    }

    fn level1(style: Style) -> Style {
        style.with_font_size(11.0).with_display(DisplayMode::Block)
    }

    static LEVEL0: StyleLayer = StyleLayer::root("level0", level0);
    static LEVEL1: StyleLayer = StyleLayer::extends(&LEVEL0, "level1", level1);
    static LEVEL2: StyleLayer = StyleLayer::extends(&LEVEL1, "level2", no_defaults);
    static SIBLING: StyleLayer = StyleLayer::extends(&LEVEL0, "sibling", |s| {
        s.with_font_style(FontStyle::Italic)
    });

    #[test]
    fn test_chain_composition_keeps_nearest_override() {
        let style = LEVEL2.base_style();
        assert_eq!(style.font_size, Some(11.0));
        assert_eq!(style.position, Some(PositionMode::Static));
        assert_eq!(style.display, Some(DisplayMode::Block));
    }

    #[test]
    fn test_each_call_returns_independent_instance() {
        let mut first = LEVEL2.base_style();
        first.font_size = Some(99.0);
        let second = LEVEL2.base_style();
        assert_eq!(second.font_size, Some(11.0));
    }

    #[test]
    fn test_chain_order_and_ancestry() {
        let names: Vec<&str> = LEVEL2.chain().iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["level0", "level1", "level2"]);
        assert_eq!(LEVEL2.depth(), 2);
        assert!(LEVEL2.extends_layer(&LEVEL0));
        assert!(!SIBLING.extends_layer(&LEVEL1));
    }

    #[test]
    fn test_resolve_full_style_priority() {
        let class = Style::new().with_font_size(20.0);
        let explicit = Style::new().with_font_size(30.0);
        let parent = Style::new().with_font_style(FontStyle::Oblique);

        let full = resolve_full_style(LEVEL1.base_style(), &[&class, &explicit], Some(&parent));
        assert_eq!(full.font_size, Some(30.0));
        assert_eq!(full.font_style, Some(FontStyle::Oblique));
        assert_eq!(full.display, Some(DisplayMode::Block));
    }
}
