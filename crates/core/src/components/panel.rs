use crate::capability::Capabilities;
use crate::component::{Component, COMPONENT_LAYER};
use quire_style::{DisplayMode, FontStyle, Margins, PositionMode, Style, StyleLayer};
use quire_types::ObjectType;

fn panel_defaults(style: Style) -> Style {
    style
        .with_display(DisplayMode::Block)
        .with_position(PositionMode::Static)
}

fn blockquote_defaults(style: Style) -> Style {
    style
        .with_margin(Margins::new(10.0, 20.0, 10.0, 20.0))
        .with_font_style(FontStyle::Italic)
}

/// Block container; most block-level components build on its layer.
pub static PANEL_LAYER: StyleLayer = StyleLayer::extends(&COMPONENT_LAYER, "panel", panel_defaults);

static BLOCKQUOTE_LAYER: StyleLayer =
    StyleLayer::extends(&PANEL_LAYER, "blockquote", blockquote_defaults);

#[derive(Debug, Default)]
pub struct Panel;

impl Component for Panel {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("panel")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::BINDABLE
    }

    fn style_layer(&self) -> &'static StyleLayer {
        &PANEL_LAYER
    }
}

#[derive(Debug, Default)]
pub struct BlockQuote;

impl Component for BlockQuote {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("quote")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::BINDABLE
    }

    fn style_layer(&self) -> &'static StyleLayer {
        &BLOCKQUOTE_LAYER
    }
}
