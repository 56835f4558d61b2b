use crate::capability::Capabilities;
use crate::component::{Component, COMPONENT_LAYER};
use crate::context::{LoadContext, RenderContext};
use crate::error::{DocumentError, Result};
use crate::trace::TraceLevel;
use crate::tree::ComponentTree;
use quire_style::{DisplayMode, PositionMode, StyleLayer};
use quire_traits::{ObjectReference, RenderWriter, SharedResourceData};
use quire_types::{ComponentId, ObjectType};

static IMAGE_LAYER: StyleLayer = StyleLayer::extends(&COMPONENT_LAYER, "image", |style| {
    style
        .with_display(DisplayMode::Block)
        .with_position(PositionMode::Static)
});

/// An image whose bytes are fetched from the resource provider at load.
///
/// A missing image fails a strict document. A lax document logs the failure
/// and hides the image.
#[derive(Debug)]
pub struct Image {
    source: String,
    data: Option<SharedResourceData>,
}

impl Image {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            data: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }
}

impl Component for Image {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("img")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::BINDABLE
    }

    fn style_layer(&self) -> &'static StyleLayer {
        &IMAGE_LAYER
    }

    fn on_load(
        &mut self,
        tree: &mut ComponentTree,
        id: ComponentId,
        ctx: &mut LoadContext<'_>,
    ) -> Result<()> {
        match ctx.resources.load(&self.source) {
            Ok(data) => {
                self.data = Some(data);
                Ok(())
            }
            Err(err) if ctx.is_strict() => Err(DocumentError::Resource(err)),
            Err(err) => {
                ctx.trace_log.add_error(TraceLevel::Warning, "Image", &err);
                tree.node_mut(id)?.set_visible(false);
                Ok(())
            }
        }
    }

    fn output_to_target(
        &mut self,
        tree: &ComponentTree,
        id: ComponentId,
        ctx: &mut RenderContext<'_>,
        writer: &mut dyn RenderWriter,
    ) -> Result<Option<ObjectReference>> {
        let Some(data) = &self.data else {
            return Ok(None);
        };
        let style = ctx.styles.full_style(tree, id, ctx.base.stylesheet)?;
        Ok(Some(writer.write_image(&self.source, data, &style)?))
    }
}
