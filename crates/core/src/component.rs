//! The component abstraction and the per-node data the tree keeps for it.
//!
//! A component's behaviour lives in a [`Component`] trait object. Identity,
//! style, parent link and child list live in the surrounding [`ComponentNode`],
//! which the tree owns, so hooks can freely mutate the tree around them.

use crate::capability::Capabilities;
use crate::context::{DataContext, InitContext, LayoutContext, LoadContext, RenderContext};
use crate::error::Result;
use crate::lifecycle::LifecycleState;
use crate::list::ComponentList;
use crate::tree::ComponentTree;
use quire_style::{parse_inline_css, Style, StyleLayer};
use quire_traits::{GraphicsPath, ObjectReference, RenderWriter};
use quire_types::{ComponentId, ObjectType, Size};
use std::any::{Any, TypeId};
use std::fmt;

/// Object-safe access to `Any` for trait objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn component_defaults(style: Style) -> Style {
    style
}

/// Root of every base style chain.
pub static COMPONENT_LAYER: StyleLayer = StyleLayer::root("component", component_defaults);

/// Behaviour of a component type.
///
/// Every hook receives the tree and the component's own id. While a hook runs,
/// the component's behaviour is checked out of the tree, so looking itself up
/// through the tree yields nothing.
pub trait Component: AsAny + fmt::Debug {
    fn object_type(&self) -> ObjectType;

    fn capabilities(&self) -> Capabilities {
        Capabilities::BINDABLE
    }

    /// The type's base style layer; the framework applies the whole chain.
    fn style_layer(&self) -> &'static StyleLayer {
        &COMPONENT_LAYER
    }

    /// Runs once, as soon as the component has a slot in the tree and before
    /// anything can attach it or read through it.
    fn on_created(&mut self, _tree: &mut ComponentTree, _id: ComponentId) -> Result<()> {
        Ok(())
    }

    fn on_init(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut InitContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_load(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut LoadContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_data_bind(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut DataContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_pre_layout(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut LayoutContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_layout_complete(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut LayoutContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_pre_render(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_post_render(
        &mut self,
        _tree: &mut ComponentTree,
        _id: ComponentId,
        _ctx: &mut RenderContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    /// Writes this component's own output. Containers usually write nothing
    /// and let the render walk reach their children.
    fn output_to_target(
        &mut self,
        _tree: &ComponentTree,
        _id: ComponentId,
        _ctx: &mut RenderContext<'_>,
        _writer: &mut dyn RenderWriter,
    ) -> Result<Option<ObjectReference>> {
        Ok(None)
    }

    /// Outline of a shape within the available size.
    fn create_path(&self, _available: Size, _style: &Style) -> Option<GraphicsPath> {
        None
    }

    fn on_dispose(&mut self, _tree: &mut ComponentTree, _id: ComponentId) {}
}

/// How a component came to be in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadType {
    /// Same as the parent
    #[default]
    Inherited,
    Code,
    Parsed,
    Template,
}

pub struct ComponentNode {
    pub(crate) type_id: TypeId,
    pub(crate) object_type: ObjectType,
    pub(crate) capabilities: Capabilities,
    pub(crate) layer: &'static StyleLayer,
    pub(crate) id: String,
    pub(crate) name: Option<String>,
    pub(crate) style_class: Option<String>,
    pub(crate) style: Option<Style>,
    pub(crate) visible: bool,
    pub(crate) load_type: LoadType,
    pub(crate) loaded_source: Option<String>,
    pub(crate) outline_title: Option<String>,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) content: Option<ComponentList>,
    pub(crate) state: LifecycleState,
    pub(crate) behavior: Option<Box<dyn Component>>,
}

impl ComponentNode {
    pub(crate) fn new(id: String, behavior: Box<dyn Component>) -> Self {
        Self {
            type_id: (*behavior).as_any().type_id(),
            object_type: behavior.object_type(),
            capabilities: behavior.capabilities(),
            layer: behavior.style_layer(),
            id,
            name: None,
            style_class: None,
            style: None,
            visible: true,
            load_type: LoadType::Inherited,
            loaded_source: None,
            outline_title: None,
            parent: None,
            content: None,
            state: LifecycleState::Unattached,
            behavior: Some(behavior),
        }
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn style_layer(&self) -> &'static StyleLayer {
        self.layer
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn style_class(&self) -> Option<&str> {
        self.style_class.as_deref()
    }

    pub fn set_style_class(&mut self, class: impl Into<String>) {
        self.style_class = Some(class.into());
    }

    /// Explicit style override, if any
    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    /// Explicit style override, created empty on first access
    pub fn style_mut(&mut self) -> &mut Style {
        self.style.get_or_insert_with(Style::default)
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = Some(style);
    }

    /// Parses a `style` attribute such as `"font-size: 9pt; color: #333"` and
    /// merges it over the explicit override.
    pub fn apply_inline_style(&mut self, css: &str) -> Result<()> {
        let parsed = parse_inline_css(css)?;
        self.style_mut().merge(&parsed);
        Ok(())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn load_type(&self) -> LoadType {
        self.load_type
    }

    pub fn set_load_type(&mut self, load_type: LoadType) {
        self.load_type = load_type;
    }

    /// Path of the markup this component was parsed from
    pub fn loaded_source(&self) -> Option<&str> {
        self.loaded_source.as_deref()
    }

    pub fn set_loaded_source(&mut self, source: impl Into<String>) {
        self.loaded_source = Some(source.into());
    }

    pub fn outline_title(&self) -> Option<&str> {
        self.outline_title.as_deref()
    }

    pub fn set_outline_title(&mut self, title: impl Into<String>) {
        self.outline_title = Some(title.into());
    }

    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    pub fn content(&self) -> Option<&ComponentList> {
        self.content.as_ref()
    }

    /// True when the child list exists and holds at least one component.
    pub fn has_content(&self) -> bool {
        self.content.as_ref().is_some_and(|list| !list.is_empty())
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The behaviour, unless it is checked out by a running hook.
    pub fn behavior(&self) -> Option<&dyn Component> {
        self.behavior.as_deref()
    }

    pub fn behavior_mut(&mut self) -> Option<&mut dyn Component> {
        self.behavior.as_deref_mut()
    }

    /// Concrete type test; also valid while the behaviour is checked out.
    pub fn is<T: Component>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn downcast<T: Component>(&self) -> Option<&T> {
        self.behavior()?.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.behavior_mut()?.as_any_mut().downcast_mut::<T>()
    }
}

impl fmt::Debug for ComponentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentNode")
            .field("type", &self.object_type)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("children", &self.content.as_ref().map(|c| c.len()).unwrap_or(0))
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::components::{Paragraph, TextLiteral};
    use crate::error::DocumentError;
    use crate::tree::ComponentTree;

    #[test]
    fn test_inline_style_merges_over_override() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let para = tree.create(Paragraph);
        let node = tree.node_mut(para).unwrap();
        node.set_style(quire_style::Style::new().with_font_size(10.0));
        node.apply_inline_style("font-family: Courier").unwrap();

        let style = node.style().unwrap();
        assert_eq!(style.font_size, Some(10.0));
        assert_eq!(style.font_family.as_deref(), Some("Courier"));
    }

    #[test]
    fn test_inline_style_error() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let text = tree.create(TextLiteral::new("x"));
        let err = tree.node_mut(text).unwrap().apply_inline_style("font-size:").unwrap_err();
        assert!(matches!(err, DocumentError::Style(_)));
    }

    #[test]
    fn test_downcast() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let text = tree.create(TextLiteral::new("x"));
        let node = tree.node(text).unwrap();
        assert!(node.is::<TextLiteral>());
        assert!(!node.is::<Paragraph>());
        assert_eq!(node.downcast::<TextLiteral>().map(|t| t.text()), Some("x"));
    }
}
