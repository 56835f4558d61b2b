//! Typed, flattened views over a container's child list.

use crate::capability::Capabilities;
use crate::component::{Component, ComponentNode};
use crate::error::Result;
use crate::list::ContentMut;
use crate::tree::ComponentTree;
use quire_types::ComponentId;
use std::cell::{Cell, Ref, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;

/// Decides which components a [`ComponentWrappingList`] lists.
pub trait ComponentFilter {
    fn accepts(node: &ComponentNode) -> bool;
}

impl<T: Component> ComponentFilter for T {
    fn accepts(node: &ComponentNode) -> bool {
        node.is::<T>()
    }
}

/// Accepts every visible component.
#[derive(Debug, Clone, Copy)]
pub struct AnyComponent;

impl ComponentFilter for AnyComponent {
    fn accepts(_node: &ComponentNode) -> bool {
        true
    }
}

/// A cached view of the components of type `T` in a container's content.
///
/// Invisible containers are looked through, data sources and no-op markers
/// are skipped. The cache is rebuilt on the first read after any change to
/// the underlying list, or to the list of any invisible container inside it.
pub struct ComponentWrappingList<T: ComponentFilter> {
    owner: ComponentId,
    dirty: Rc<Cell<bool>>,
    items: RefCell<Vec<ComponentId>>,
    _filter: PhantomData<fn() -> T>,
}

impl<T: ComponentFilter> ComponentWrappingList<T> {
    /// Creates the view, creating the owner's child list if it has none yet.
    pub fn new(tree: &mut ComponentTree, owner: ComponentId) -> Result<Self> {
        tree.content_mut(owner)?;
        let dirty = Rc::new(Cell::new(true));
        if let Some(list) = tree.content(owner) {
            list.subscribe(&dirty);
        }
        Ok(Self {
            owner,
            dirty,
            items: RefCell::new(Vec::new()),
            _filter: PhantomData,
        })
    }

    pub fn owner(&self) -> ComponentId {
        self.owner
    }

    fn ensure(&self, tree: &ComponentTree) -> Ref<'_, Vec<ComponentId>> {
        if self.dirty.get() {
            let mut items = Vec::new();
            self.collect(tree, self.owner, &mut items);
            *self.items.borrow_mut() = items;
            self.dirty.set(false);
        }
        self.items.borrow()
    }

    fn collect(&self, tree: &ComponentTree, container: ComponentId, out: &mut Vec<ComponentId>) {
        let Some(list) = tree.content(container) else {
            return;
        };
        for child in list.iter() {
            let Ok(node) = tree.node(child) else {
                continue;
            };
            let caps = node.capabilities();
            if caps.contains(Capabilities::INVISIBLE_CONTAINER) && node.has_content() {
                self.collect(tree, child, out);
            } else if caps.is_hidden_from_views() {
                continue;
            } else if T::accepts(node) {
                out.push(child);
            }
        }
    }

    pub fn len(&self, tree: &ComponentTree) -> usize {
        self.ensure(tree).len()
    }

    pub fn is_empty(&self, tree: &ComponentTree) -> bool {
        self.len(tree) == 0
    }

    pub fn get(&self, tree: &ComponentTree, index: usize) -> Option<ComponentId> {
        self.ensure(tree).get(index).copied()
    }

    pub fn to_vec(&self, tree: &ComponentTree) -> Vec<ComponentId> {
        self.ensure(tree).clone()
    }

    pub fn contains(&self, tree: &ComponentTree, item: ComponentId) -> bool {
        self.ensure(tree).contains(&item)
    }

    /// True when the next read will rebuild the view.
    pub fn is_stale(&self) -> bool {
        self.dirty.get()
    }

    /// Writes go straight to the owner's list.
    pub fn content_mut<'t>(&self, tree: &'t mut ComponentTree) -> Result<ContentMut<'t>> {
        tree.content_mut(self.owner)
    }

    pub fn add(&self, tree: &mut ComponentTree, item: ComponentId) -> Result<()> {
        self.content_mut(tree)?.add(item)
    }

    pub fn insert(&self, tree: &mut ComponentTree, index: usize, item: ComponentId) -> Result<()> {
        self.content_mut(tree)?.insert(index, item)
    }

    pub fn remove(&self, tree: &mut ComponentTree, item: ComponentId) -> Result<bool> {
        self.content_mut(tree)?.remove(item)
    }

    pub fn remove_at(&self, tree: &mut ComponentTree, index: usize) -> Result<ComponentId> {
        self.content_mut(tree)?.remove_at(index)
    }

    pub fn clear(&self, tree: &mut ComponentTree) -> Result<()> {
        self.content_mut(tree)?.clear()
    }
}

impl<T: ComponentFilter> std::fmt::Debug for ComponentWrappingList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentWrappingList")
            .field("owner", &self.owner)
            .field("filter", &std::any::type_name::<T>())
            .field("stale", &self.dirty.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{DataSource, NoOp, Panel, PlaceHolder, TableRow, TextLiteral};

    #[test]
    fn test_view_filters_by_type() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let table = tree.create(Panel::default());
        let row = tree.create(TableRow::body());
        let text = tree.create(TextLiteral::new("x"));
        tree.content_mut(table).unwrap().add_range([text, row]).unwrap();

        let rows = ComponentWrappingList::<TableRow>::new(&mut tree, table).unwrap();
        assert_eq!(rows.to_vec(&tree), vec![row]);

        let all = ComponentWrappingList::<AnyComponent>::new(&mut tree, table).unwrap();
        assert_eq!(all.len(&tree), 2);
    }

    #[test]
    fn test_skips_markers_and_flattens_placeholders() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let owner = tree.create(Panel::default());
        let holder = tree.create(PlaceHolder::default());
        let source = tree.create(DataSource::new(serde_json::json!([])));
        let noop = tree.create(NoOp);
        let a = tree.create(TextLiteral::new("a"));
        let b = tree.create(TextLiteral::new("b"));
        tree.content_mut(holder).unwrap().add(b).unwrap();
        tree.content_mut(owner).unwrap().add_range([source, a, noop, holder]).unwrap();

        let view = ComponentWrappingList::<AnyComponent>::new(&mut tree, owner).unwrap();
        assert_eq!(view.to_vec(&tree), vec![a, b]);
    }

    #[test]
    fn test_nested_change_invalidates_view() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let owner = tree.create(Panel::default());
        let holder = tree.create(PlaceHolder::default());
        let a = tree.create(TextLiteral::new("a"));
        tree.content_mut(owner).unwrap().add(holder).unwrap();

        let view = ComponentWrappingList::<TextLiteral>::new(&mut tree, owner).unwrap();
        assert!(view.is_empty(&tree));
        assert!(!view.is_stale());

        tree.content_mut(holder).unwrap().add(a).unwrap();
        assert!(view.is_stale());
        assert_eq!(view.to_vec(&tree), vec![a]);
    }

    #[test]
    fn test_writes_go_to_underlying_list() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let owner = tree.create(Panel::default());
        let a = tree.create(TextLiteral::new("a"));
        let view = ComponentWrappingList::<TextLiteral>::new(&mut tree, owner).unwrap();

        view.add(&mut tree, a).unwrap();
        assert_eq!(tree.children(owner), &[a]);
        assert_eq!(view.get(&tree, 0), Some(a));

        view.remove_at(&mut tree, 0).unwrap();
        assert_eq!(view.len(&tree), 0);
    }
}
