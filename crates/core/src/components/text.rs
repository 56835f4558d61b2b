use crate::capability::Capabilities;
use crate::component::{Component, COMPONENT_LAYER};
use crate::components::PANEL_LAYER;
use crate::context::{DataContext, RenderContext};
use crate::error::Result;
use crate::tree::ComponentTree;
use quire_style::{no_defaults, DisplayMode, FontWeight, Style, StyleLayer};
use quire_traits::{ObjectReference, RenderWriter};
use quire_types::{ComponentId, ObjectType};
use serde_json::Value;

static SPAN_LAYER: StyleLayer = StyleLayer::extends(&COMPONENT_LAYER, "span", |style| {
    style.with_display(DisplayMode::Inline)
});

static PARAGRAPH_LAYER: StyleLayer = StyleLayer::extends(&PANEL_LAYER, "paragraph", no_defaults);

static HEADING_LAYER: StyleLayer = StyleLayer::extends(&PANEL_LAYER, "heading", |style| {
    style.with_font_weight(FontWeight::Bold)
});

static HEADING_LEVELS: [StyleLayer; 6] = [
    StyleLayer::extends(&HEADING_LAYER, "h1", |s| s.with_font_size(24.0)),
    StyleLayer::extends(&HEADING_LAYER, "h2", |s| s.with_font_size(20.0)),
    StyleLayer::extends(&HEADING_LAYER, "h3", |s| s.with_font_size(16.0)),
    StyleLayer::extends(&HEADING_LAYER, "h4", |s| s.with_font_size(14.0)),
    StyleLayer::extends(&HEADING_LAYER, "h5", |s| s.with_font_size(12.0)),
    StyleLayer::extends(&HEADING_LAYER, "h6", |s| s.with_font_size(10.0)),
];

/// Inline container.
#[derive(Debug, Default)]
pub struct Span;

impl Component for Span {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("span")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::BINDABLE
    }

    fn style_layer(&self) -> &'static StyleLayer {
        &SPAN_LAYER
    }
}

#[derive(Debug, Default)]
pub struct Paragraph;

impl Component for Paragraph {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("para")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::BINDABLE
    }

    fn style_layer(&self) -> &'static StyleLayer {
        &PARAGRAPH_LAYER
    }
}

/// Heading with a level from 1 to 6; out of range levels are clamped.
#[derive(Debug)]
pub struct Heading {
    level: u8,
}

impl Heading {
    pub fn new(level: u8) -> Self {
        Self {
            level: level.clamp(1, 6),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Component for Heading {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("head")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::BINDABLE
    }

    fn style_layer(&self) -> &'static StyleLayer {
        &HEADING_LEVELS[usize::from(self.level - 1)]
    }
}

/// A run of text, optionally taken from the current data item.
#[derive(Debug, Default)]
pub struct TextLiteral {
    text: String,
    binding: Option<String>,
}

impl TextLiteral {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            binding: None,
        }
    }

    /// Text read from a JSON pointer into the current data item at bind time.
    pub fn bound(pointer: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            binding: Some(pointer.into()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Component for TextLiteral {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("text")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::TEXT_LITERAL | Capabilities::BINDABLE
    }

    fn on_data_bind(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        ctx: &mut DataContext<'_>,
    ) -> Result<()> {
        if let Some(pointer) = &self.binding {
            self.text = ctx.select(pointer).as_ref().map(value_text).unwrap_or_default();
        }
        Ok(())
    }

    fn output_to_target(
        &mut self,
        tree: &ComponentTree,
        id: ComponentId,
        ctx: &mut RenderContext<'_>,
        writer: &mut dyn RenderWriter,
    ) -> Result<Option<ObjectReference>> {
        if self.text.is_empty() {
            return Ok(None);
        }
        let style: Style = ctx.styles.full_style(tree, id, ctx.base.stylesheet)?;
        Ok(Some(writer.write_text(&self.text, &style)?))
    }
}
