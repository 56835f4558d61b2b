//! Ordered child lists.
//!
//! [`ComponentList`] is the read side, stored on the owning node. Mutation goes
//! through [`ContentMut`], which borrows the whole tree so it can keep parent
//! links, the no-op counter and the name registry consistent with the list.

use crate::capability::Capabilities;
use crate::error::{DocumentError, Result};
use crate::tree::ComponentTree;
use quire_types::ComponentId;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Debug)]
pub struct ComponentList {
    owner: ComponentId,
    items: Vec<ComponentId>,
    noop_count: usize,
    subscribers: RefCell<Vec<Weak<Cell<bool>>>>,
}

impl ComponentList {
    pub(crate) fn new(owner: ComponentId) -> Self {
        Self {
            owner,
            items: Vec::new(),
            noop_count: 0,
            subscribers: RefCell::new(Vec::new()),
        }
    }

    pub fn owner(&self) -> ComponentId {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<ComponentId> {
        self.items.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.items.iter().copied()
    }

    pub fn as_slice(&self) -> &[ComponentId] {
        &self.items
    }

    pub fn index_of(&self, item: ComponentId) -> Option<usize> {
        self.items.iter().position(|i| *i == item)
    }

    pub fn contains(&self, item: ComponentId) -> bool {
        self.items.contains(&item)
    }

    pub fn to_vec(&self) -> Vec<ComponentId> {
        self.items.clone()
    }

    /// Number of placeholder entries currently in the list.
    pub fn noop_count(&self) -> usize {
        self.noop_count
    }

    /// True when every entry is a no-op placeholder.
    pub fn only_noops(&self) -> bool {
        !self.items.is_empty() && self.noop_count == self.items.len()
    }

    pub(crate) fn increment_noops(&mut self) {
        self.noop_count += 1;
    }

    pub(crate) fn decrement_noops(&mut self) -> Result<()> {
        self.noop_count = self
            .noop_count
            .checked_sub(1)
            .ok_or(DocumentError::NoOpCountOutOfRange { owner: self.owner })?;
        Ok(())
    }

    /// Registers a dirty flag that is raised on every change to this list.
    pub(crate) fn subscribe(&self, flag: &Rc<Cell<bool>>) {
        let mut subscribers = self.subscribers.borrow_mut();
        let already = subscribers
            .iter()
            .any(|weak| weak.upgrade().is_some_and(|s| Rc::ptr_eq(&s, flag)));
        if !already {
            subscribers.push(Rc::downgrade(flag));
        }
    }

    pub(crate) fn notify(&self) {
        self.subscribers.borrow_mut().retain(|weak| match weak.upgrade() {
            Some(flag) => {
                flag.set(true);
                true
            }
            None => false,
        });
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

/// Mutation handle for one container's child list. Obtained from
/// [`ComponentTree::content_mut`].
pub struct ContentMut<'a> {
    tree: &'a mut ComponentTree,
    owner: ComponentId,
}

impl<'a> ContentMut<'a> {
    pub(crate) fn new(tree: &'a mut ComponentTree, owner: ComponentId) -> Self {
        Self { tree, owner }
    }

    pub fn owner(&self) -> ComponentId {
        self.owner
    }

    fn list(&self) -> Result<&ComponentList> {
        self.tree
            .node(self.owner)?
            .content
            .as_ref()
            .ok_or(DocumentError::NotAContainer(self.owner))
    }

    fn list_mut(&mut self) -> Result<&mut ComponentList> {
        let owner = self.owner;
        self.tree
            .node_mut(owner)?
            .content
            .as_mut()
            .ok_or(DocumentError::NotAContainer(owner))
    }

    pub fn len(&self) -> usize {
        self.list().map(ComponentList::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn index_of(&self, item: ComponentId) -> Option<usize> {
        self.list().ok()?.index_of(item)
    }

    pub fn add(&mut self, item: ComponentId) -> Result<()> {
        let len = self.len();
        self.insert(len, item)
    }

    /// Inserts `item` at `index`. An item already in this list is moved; an
    /// item in another list is detached from it first.
    pub fn insert(&mut self, index: usize, item: ComponentId) -> Result<()> {
        let owner = self.owner;
        self.tree.node(item)?;
        if self.tree.is_ancestor_or_self(item, owner) {
            return Err(DocumentError::InvalidHierarchy {
                parent: owner,
                child: item,
                reason: "a component cannot contain itself or one of its ancestors",
            });
        }

        if let Some(current) = self.index_of(item) {
            let len = self.len();
            if index > len {
                return Err(DocumentError::IndexOutOfRange { index, len });
            }
            return self.move_item(current, index.min(len - 1));
        }

        let len = self.len();
        if index > len {
            return Err(DocumentError::IndexOutOfRange { index, len });
        }

        let attach_names = self.tree.is_rooted(owner);
        if attach_names {
            self.tree.check_names_available(item)?;
        }

        if let Some(previous) = self.tree.parent(item) {
            if self.tree.content(previous).is_some_and(|l| l.contains(item)) {
                self.tree.content_mut(previous)?.remove(item)?;
            } else {
                self.tree.node_mut(item)?.parent = None;
            }
        }

        let is_noop = self.tree.node(item)?.capabilities.contains(Capabilities::NO_OP);
        {
            let list = self.list_mut()?;
            list.items.insert(index, item);
            if is_noop {
                list.increment_noops();
            }
        }
        self.tree.node_mut(item)?.parent = Some(owner);
        if attach_names {
            self.tree.register_subtree(item);
        }
        log::trace!("Added {} to {} at {}", item, owner, index);
        self.tree.notify_content_changed(owner);
        Ok(())
    }

    /// Removes `item`; returns false when it was not in the list.
    pub fn remove(&mut self, item: ComponentId) -> Result<bool> {
        match self.index_of(item) {
            Some(index) => {
                self.remove_at(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Result<ComponentId> {
        let owner = self.owner;
        let len = self.len();
        if index >= len {
            return Err(DocumentError::IndexOutOfRange { index, len });
        }
        let item = self.list_mut()?.items.remove(index);
        if self.tree.node(item)?.capabilities.contains(Capabilities::NO_OP) {
            self.list_mut()?.decrement_noops()?;
        }
        self.detach(item)?;
        self.tree.notify_content_changed(owner);
        Ok(item)
    }

    /// Empties the list, detaching every item.
    pub fn clear(&mut self) -> Result<()> {
        let owner = self.owner;
        let items = {
            let list = self.list_mut()?;
            list.noop_count = 0;
            std::mem::take(&mut list.items)
        };
        for item in items {
            self.detach(item)?;
        }
        self.tree.notify_content_changed(owner);
        Ok(())
    }

    pub fn add_range(&mut self, items: impl IntoIterator<Item = ComponentId>) -> Result<()> {
        for item in items {
            self.add(item)?;
        }
        Ok(())
    }

    /// Moves the item at `from` so it ends up at `to`.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        let owner = self.owner;
        let len = self.len();
        if from >= len {
            return Err(DocumentError::IndexOutOfRange { index: from, len });
        }
        if to >= len {
            return Err(DocumentError::IndexOutOfRange { index: to, len });
        }
        if from == to {
            return Ok(());
        }
        let list = self.list_mut()?;
        let item = list.items.remove(from);
        list.items.insert(to, item);
        self.tree.notify_content_changed(owner);
        Ok(())
    }

    /// Moves the item to the end of `target`'s list.
    pub fn move_to(&mut self, item: ComponentId, target: ComponentId) -> Result<()> {
        if !self.list()?.contains(item) {
            return Err(DocumentError::InvalidHierarchy {
                parent: self.owner,
                child: item,
                reason: "the component is not in this list",
            });
        }
        self.tree.content_mut(target)?.add(item)
    }

    /// Releases the parent link unless another list has already claimed the item.
    fn detach(&mut self, item: ComponentId) -> Result<()> {
        if self.tree.parent(item) == Some(self.owner) {
            if self.tree.is_rooted(self.owner) {
                self.tree.unregister_subtree(item);
            }
            self.tree.node_mut(item)?.parent = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{NoOp, Panel, TextLiteral};

    fn tree_with_panel() -> (ComponentTree, ComponentId) {
        let mut tree = ComponentTree::with_id_prefix("t");
        let panel = tree.create(Panel::default());
        (tree, panel)
    }

    #[test]
    fn test_add_sets_parent() {
        let (mut tree, panel) = tree_with_panel();
        let text = tree.create(TextLiteral::new("hi"));
        tree.content_mut(panel).unwrap().add(text).unwrap();

        assert_eq!(tree.parent(text), Some(panel));
        assert_eq!(tree.children(panel), &[text]);
    }

    #[test]
    fn test_insert_out_of_range() {
        let (mut tree, panel) = tree_with_panel();
        let text = tree.create(TextLiteral::new("hi"));
        let err = tree.content_mut(panel).unwrap().insert(1, text).unwrap_err();
        assert!(matches!(err, DocumentError::IndexOutOfRange { index: 1, len: 0 }));
        assert_eq!(tree.parent(text), None);
    }

    #[test]
    fn test_item_moves_between_lists() {
        let (mut tree, first) = tree_with_panel();
        let second = tree.create(Panel::default());
        let text = tree.create(TextLiteral::new("hi"));

        tree.content_mut(first).unwrap().add(text).unwrap();
        tree.content_mut(second).unwrap().add(text).unwrap();

        assert!(tree.children(first).is_empty());
        assert_eq!(tree.children(second), &[text]);
        assert_eq!(tree.parent(text), Some(second));
    }

    #[test]
    fn test_cannot_add_ancestor() {
        let (mut tree, outer) = tree_with_panel();
        let inner = tree.create(Panel::default());
        tree.content_mut(outer).unwrap().add(inner).unwrap();

        let err = tree.content_mut(inner).unwrap().add(outer).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidHierarchy { .. }));
        let err = tree.content_mut(inner).unwrap().add(inner).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidHierarchy { .. }));
    }

    #[test]
    fn test_noop_counter_follows_membership() {
        let (mut tree, panel) = tree_with_panel();
        let a = tree.create(NoOp);
        let b = tree.create(NoOp);
        let text = tree.create(TextLiteral::new("x"));
        {
            let mut content = tree.content_mut(panel).unwrap();
            content.add_range([a, text, b]).unwrap();
        }
        assert_eq!(tree.content(panel).unwrap().noop_count(), 2);

        tree.content_mut(panel).unwrap().remove(a).unwrap();
        assert_eq!(tree.content(panel).unwrap().noop_count(), 1);

        tree.content_mut(panel).unwrap().clear().unwrap();
        assert_eq!(tree.content(panel).unwrap().noop_count(), 0);
        assert_eq!(tree.parent(b), None);
    }

    #[test]
    fn test_decrement_below_zero_fails() {
        let mut list = ComponentList::new(ComponentId::default());
        let err = list.decrement_noops().unwrap_err();
        assert!(matches!(err, DocumentError::NoOpCountOutOfRange { .. }));
    }

    #[test]
    fn test_move_item_reorders() {
        let (mut tree, panel) = tree_with_panel();
        let a = tree.create(TextLiteral::new("a"));
        let b = tree.create(TextLiteral::new("b"));
        let c = tree.create(TextLiteral::new("c"));
        tree.content_mut(panel).unwrap().add_range([a, b, c]).unwrap();

        tree.content_mut(panel).unwrap().move_item(0, 2).unwrap();
        assert_eq!(tree.children(panel), &[b, c, a]);

        // re-adding an existing member is a move
        tree.content_mut(panel).unwrap().insert(0, a).unwrap();
        assert_eq!(tree.children(panel), &[a, b, c]);
    }

    #[test]
    fn test_not_a_container() {
        let mut tree = ComponentTree::with_id_prefix("t");
        let text = tree.create(TextLiteral::new("leaf"));
        assert!(matches!(
            tree.content_mut(text).err(),
            Some(DocumentError::NotAContainer(_))
        ));
    }

    #[test]
    fn test_subscribers_marked_dirty() {
        let (mut tree, panel) = tree_with_panel();
        let flag = Rc::new(Cell::new(false));
        tree.content_mut(panel).unwrap();
        tree.content(panel).unwrap().subscribe(&flag);
        tree.content(panel).unwrap().subscribe(&flag);
        assert_eq!(tree.content(panel).unwrap().subscriber_count(), 1);

        let text = tree.create(TextLiteral::new("a"));
        tree.content_mut(panel).unwrap().add(text).unwrap();
        assert!(flag.get());

        drop(flag);
        tree.notify_content_changed(panel);
        assert_eq!(tree.content(panel).unwrap().subscriber_count(), 0);
    }

    #[test]
    fn test_remove_clears_parent() {
        let (mut tree, panel) = tree_with_panel();
        let a = tree.create(TextLiteral::new("a"));
        let b = tree.create(TextLiteral::new("b"));
        tree.content_mut(panel).unwrap().add_range([a, b]).unwrap();

        assert!(tree.content_mut(panel).unwrap().remove(a).unwrap());
        assert_eq!(tree.parent(a), None);
        assert!(!tree.content_mut(panel).unwrap().remove(a).unwrap());

        let removed = tree.content_mut(panel).unwrap().remove_at(0).unwrap();
        assert_eq!(removed, b);
        assert_eq!(tree.parent(b), None);
        assert!(tree.children(panel).is_empty());
    }

    #[test]
    fn test_move_to_other_container() {
        let (mut tree, source) = tree_with_panel();
        let target = tree.create(Panel::default());
        let a = tree.create(TextLiteral::new("a"));
        let b = tree.create(TextLiteral::new("b"));
        let c = tree.create(TextLiteral::new("c"));
        let skip = tree.create(NoOp);
        tree.content_mut(source).unwrap().add_range([a, b, skip]).unwrap();
        tree.content_mut(target).unwrap().add(c).unwrap();

        tree.content_mut(source).unwrap().move_to(a, target).unwrap();
        tree.content_mut(source).unwrap().move_to(skip, target).unwrap();

        assert_eq!(tree.children(source), &[b]);
        assert_eq!(tree.children(target), &[c, a, skip]);
        assert_eq!(tree.parent(a), Some(target));
        assert_eq!(tree.content(source).unwrap().noop_count(), 0);
        assert_eq!(tree.content(target).unwrap().noop_count(), 1);
    }

    #[test]
    fn test_move_to_requires_membership() {
        let (mut tree, source) = tree_with_panel();
        let target = tree.create(Panel::default());
        let stray = tree.create(TextLiteral::new("stray"));

        let err = tree.content_mut(source).unwrap().move_to(stray, target).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidHierarchy { .. }));
        assert_eq!(tree.parent(stray), None);
    }
}
