use crate::capability::Capabilities;
use crate::component::Component;
use crate::components::PANEL_LAYER;
use crate::error::Result;
use crate::tree::ComponentTree;
use crate::wrapping::ComponentWrappingList;
use quire_style::{ListStyleType, StyleLayer};
use quire_types::{ComponentId, ObjectType};

static UNORDERED_LAYER: StyleLayer = StyleLayer::extends(&PANEL_LAYER, "list", |mut style| {
    style.list_style_type = Some(ListStyleType::Disc);
    style
});

static ORDERED_LAYER: StyleLayer =
    StyleLayer::extends(&UNORDERED_LAYER, "ordered-list", |mut style| {
        style.list_style_type = Some(ListStyleType::Decimal);
        style
    });

static ITEM_LAYER: StyleLayer = StyleLayer::extends(&PANEL_LAYER, "list-item", |style| style);

/// Ordered or unordered list of [`ListItem`]s.
#[derive(Debug, Default)]
pub struct ListBlock {
    ordered: bool,
    items: Option<ComponentWrappingList<ListItem>>,
}

impl ListBlock {
    pub fn ordered() -> Self {
        Self {
            ordered: true,
            items: None,
        }
    }

    pub fn unordered() -> Self {
        Self::default()
    }

    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    pub fn items(&self, tree: &ComponentTree) -> Vec<ComponentId> {
        self.items.as_ref().map(|items| items.to_vec(tree)).unwrap_or_default()
    }
}

impl Component for ListBlock {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("list")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::BINDABLE
    }

    fn style_layer(&self) -> &'static StyleLayer {
        if self.ordered { &ORDERED_LAYER } else { &UNORDERED_LAYER }
    }

    fn on_created(&mut self, tree: &mut ComponentTree, id: ComponentId) -> Result<()> {
        self.items = Some(ComponentWrappingList::new(tree, id)?);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ListItem;

impl Component for ListItem {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("item")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER | Capabilities::BINDABLE
    }

    fn style_layer(&self) -> &'static StyleLayer {
        &ITEM_LAYER
    }
}
