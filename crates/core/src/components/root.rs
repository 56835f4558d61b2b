use crate::capability::Capabilities;
use crate::component::{Component, COMPONENT_LAYER};
use quire_style::{OverflowAction, PageOrientation, PageSize, Style, StyleLayer};
use quire_types::{Color, ObjectType};

fn document_defaults(mut style: Style) -> Style {
    style.font_family = Some("Helvetica".to_string());
    style.font_size = Some(12.0);
    style.fill = Some(Color::BLACK);
    style.page_size = Some(PageSize::A4);
    style.page_orientation = Some(PageOrientation::Portrait);
    style
}

pub static DOCUMENT_LAYER: StyleLayer =
    StyleLayer::extends(&COMPONENT_LAYER, "document", document_defaults);

static PAGE_LAYER: StyleLayer = StyleLayer::extends(&COMPONENT_LAYER, "page", |mut style| {
    style.overflow_action = Some(OverflowAction::None);
    style
});

/// Top of every document tree.
#[derive(Debug, Default)]
pub struct DocumentRoot;

impl Component for DocumentRoot {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("doc")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::BINDABLE | Capabilities::VIEWPORT
    }

    fn style_layer(&self) -> &'static StyleLayer {
        &DOCUMENT_LAYER
    }
}

/// A page of content. Pages get their own layout engine and prefix the
/// unique ids of everything on them.
#[derive(Debug, Default)]
pub struct Page;

impl Component for Page {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("page")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER
            | Capabilities::BINDABLE
            | Capabilities::VIEWPORT
            | Capabilities::NAMING_CONTAINER
    }

    fn style_layer(&self) -> &'static StyleLayer {
        &PAGE_LAYER
    }
}
