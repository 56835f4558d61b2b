//! Arena storage for a document's components.
//!
//! Nodes live in a [`SlotMap`] addressed by [`ComponentId`]. A child list
//! holds ids of its children and every child holds the id of its parent; the
//! arena is the only owner. The tree also keeps the document-wide registries:
//! component names and per-type id counters.

use crate::capability::Capabilities;
use crate::component::{Component, ComponentNode, LoadType};
use crate::error::{DocumentError, Result};
use crate::list::{ComponentList, ContentMut};
use quire_types::{ComponentId, ObjectType};
use rand::Rng;
use slotmap::{Key, SlotMap};
use std::collections::{HashMap, HashSet};

pub struct ComponentTree {
    nodes: SlotMap<ComponentId, ComponentNode>,
    root: Option<ComponentId>,
    names: HashMap<String, ComponentId>,
    counters: HashMap<ObjectType, u32>,
    id_prefix: String,
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A null handle was never issued; any other missing key was released.
fn missing(id: ComponentId) -> DocumentError {
    if id.is_null() {
        DocumentError::UnknownComponent(id)
    } else {
        DocumentError::ComponentDisposed(id)
    }
}

fn random_prefix() -> String {
    let mut rng = rand::rng();
    (0..4).map(|_| rng.random_range(b'a'..=b'z') as char).collect()
}

impl ComponentTree {
    /// Creates an empty tree with a random id prefix.
    pub fn new() -> Self {
        Self::with_id_prefix(random_prefix())
    }

    pub fn with_id_prefix(prefix: impl Into<String>) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            names: HashMap::new(),
            counters: HashMap::new(),
            id_prefix: prefix.into(),
        }
    }

    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    /// Number of live components
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- Creation & access ---

    /// Adds an unattached component and returns its handle.
    pub fn create(&mut self, component: impl Component) -> ComponentId {
        self.create_boxed(Box::new(component))
    }

    pub fn create_boxed(&mut self, component: Box<dyn Component>) -> ComponentId {
        let id_text = self.next_id(component.object_type());
        let id = self.nodes.insert(ComponentNode::new(id_text, component));
        if let Err(err) = self.with_behavior(id, |c, tree| c.on_created(tree, id)) {
            log::warn!("Setting up component {} failed: {}", id, err);
        }
        id
    }

    /// Generates `<prefix><type><n>` using a per-type counter.
    pub(crate) fn next_id(&mut self, object_type: ObjectType) -> String {
        let counter = self.counters.entry(object_type).or_insert(0);
        *counter += 1;
        format!("{}{}{}", self.id_prefix, object_type, counter)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.node(id).is_ok()
    }

    pub fn node(&self, id: ComponentId) -> Result<&ComponentNode> {
        self.nodes.get(id).ok_or_else(|| missing(id))
    }

    pub fn node_mut(&mut self, id: ComponentId) -> Result<&mut ComponentNode> {
        self.nodes.get_mut(id).ok_or_else(|| missing(id))
    }

    /// The component's behaviour as `T`, if it is one.
    pub fn get<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.node(id).ok()?.downcast::<T>()
    }

    pub fn get_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.node_mut(id).ok()?.downcast_mut::<T>()
    }

    /// Frees the slot. Later use of `id` reports [`DocumentError::ComponentDisposed`].
    pub(crate) fn release(&mut self, id: ComponentId) {
        if self.nodes.remove(id).is_some() && self.root == Some(id) {
            self.root = None;
        }
    }

    /// Runs `f` with the component's behaviour checked out of its slot.
    pub(crate) fn with_behavior<R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut dyn Component, &mut ComponentTree) -> Result<R>,
    ) -> Result<R> {
        let mut behavior = self
            .node_mut(id)?
            .behavior
            .take()
            .ok_or(DocumentError::ComponentBusy(id))?;
        let result = f(behavior.as_mut(), self);
        if let Ok(node) = self.node_mut(id) {
            node.behavior = Some(behavior);
        }
        result
    }

    // --- Structure ---

    pub fn root(&self) -> Option<ComponentId> {
        self.root
    }

    /// Makes an unattached component the document root and registers the
    /// names in its subtree.
    pub fn set_root(&mut self, id: ComponentId) -> Result<()> {
        let node = self.node(id)?;
        if node.parent.is_some() {
            return Err(DocumentError::InvalidHierarchy {
                parent: id,
                child: id,
                reason: "the root cannot have a parent",
            });
        }
        if let Some(previous) = self.root.filter(|previous| *previous != id) {
            self.unregister_subtree(previous);
        }
        self.check_names_available(id)?;
        self.root = Some(id);
        self.register_subtree(id);
        Ok(())
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.node(id).ok()?.parent
    }

    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.content(id).map(ComponentList::as_slice).unwrap_or(&[])
    }

    pub fn content(&self, id: ComponentId) -> Option<&ComponentList> {
        self.node(id).ok()?.content.as_ref()
    }

    pub fn has_content(&self, id: ComponentId) -> bool {
        self.node(id).map(ComponentNode::has_content).unwrap_or(false)
    }

    /// Mutable access to a container's child list, created on first use.
    pub fn content_mut(&mut self, owner: ComponentId) -> Result<ContentMut<'_>> {
        let node = self.node_mut(owner)?;
        if !node.capabilities.is_container() {
            return Err(DocumentError::NotAContainer(owner));
        }
        node.content.get_or_insert_with(|| ComponentList::new(owner));
        Ok(ContentMut::new(self, owner))
    }

    /// Parents of `id`, nearest first.
    pub fn ancestors(&self, id: ComponentId) -> impl Iterator<Item = ComponentId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    pub fn is_ancestor_or_self(&self, ancestor: ComponentId, id: ComponentId) -> bool {
        ancestor == id || self.ancestors(id).any(|a| a == ancestor)
    }

    /// True when the component is the root or hangs below it.
    pub fn is_rooted(&self, id: ComponentId) -> bool {
        match self.root {
            Some(root) => self.is_ancestor_or_self(root, id),
            None => false,
        }
    }

    /// Nearest ancestor able to hold child components.
    pub fn container_parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.ancestors(id).find(|a| {
            self.node(*a)
                .map(|n| n.capabilities.is_container())
                .unwrap_or(false)
        })
    }

    /// Depth-first, pre-order list of every component below `id`.
    pub fn descendants(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut out = Vec::new();
        let mut stack: Vec<ComponentId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    // --- Identity ---

    pub fn set_id(&mut self, id: ComponentId, text: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.id = text.into();
        Ok(())
    }

    /// Renames a component, keeping the document registry in step when the
    /// component is attached to the root.
    pub fn set_name(&mut self, id: ComponentId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.is_rooted(id) {
            if let Some(existing) = self.names.get(&name).filter(|existing| **existing != id) {
                log::debug!("Name '{}' already registered to {}", name, existing);
                return Err(DocumentError::DuplicateName(name));
            }
            if let Some(old) = self.node(id)?.name.clone() {
                self.names.remove(&old);
            }
            self.names.insert(name.clone(), id);
        }
        self.node_mut(id)?.name = Some(name);
        Ok(())
    }

    /// Registry lookup of a rooted component by name.
    pub fn lookup_name(&self, name: &str) -> Option<ComponentId> {
        self.names.get(name).copied()
    }

    /// Id qualified by every enclosing naming container, outermost first.
    pub fn unique_id(&self, id: ComponentId) -> Result<String> {
        let own = self.node(id)?.id.clone();
        let mut parts: Vec<String> = self
            .ancestors(id)
            .filter_map(|a| self.node(a).ok())
            .filter(|n| n.capabilities.contains(Capabilities::NAMING_CONTAINER))
            .map(|n| n.id.clone())
            .collect();
        parts.reverse();
        parts.push(own);
        Ok(parts.join("$"))
    }

    /// Load type with `Inherited` resolved through the parents; `Code` at the top.
    pub fn effective_load_type(&self, id: ComponentId) -> LoadType {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|c| self.node(c).ok())
            .map(|n| n.load_type)
            .find(|t| *t != LoadType::Inherited)
            .unwrap_or(LoadType::Code)
    }

    /// Checks `from` and then its content depth-first for the given id text.
    pub fn find_by_id(&self, from: ComponentId, id_text: &str) -> Option<ComponentId> {
        std::iter::once(from)
            .chain(self.descendants(from))
            .find(|c| self.node(*c).map(|n| n.id == id_text).unwrap_or(false))
    }

    /// Depth-first search by name, falling back to the document registry.
    pub fn find_by_name(&self, from: ComponentId, name: &str) -> Option<ComponentId> {
        std::iter::once(from)
            .chain(self.descendants(from))
            .find(|c| {
                self.node(*c)
                    .map(|n| n.name.as_deref() == Some(name))
                    .unwrap_or(false)
            })
            .or_else(|| self.lookup_name(name))
    }

    // --- Registry maintenance ---

    /// Fails if attaching `item` would put two components with one name in the registry.
    pub(crate) fn check_names_available(&self, item: ComponentId) -> Result<()> {
        let mut seen = HashSet::new();
        for candidate in std::iter::once(item).chain(self.descendants(item)) {
            let Some(name) = self.node(candidate)?.name.as_deref() else {
                continue;
            };
            let clash = self.names.get(name).is_some_and(|owner| *owner != candidate);
            if clash || !seen.insert(name) {
                return Err(DocumentError::DuplicateName(name.to_string()));
            }
        }
        Ok(())
    }

    pub(crate) fn register_subtree(&mut self, item: ComponentId) {
        for candidate in std::iter::once(item).chain(self.descendants(item)) {
            if let Some(name) = self.node(candidate).ok().and_then(|n| n.name.clone()) {
                self.names.insert(name, candidate);
            }
        }
    }

    pub(crate) fn unregister_subtree(&mut self, item: ComponentId) {
        for candidate in std::iter::once(item).chain(self.descendants(item)) {
            if let Some(name) = self.node(candidate).ok().and_then(|n| n.name.clone()) {
                if self.names.get(&name) == Some(&candidate) {
                    self.names.remove(&name);
                }
            }
        }
    }

    /// Marks views over `owner`'s list stale. Changes inside an invisible
    /// container also stale the views of the list that holds it.
    pub(crate) fn notify_content_changed(&self, owner: ComponentId) {
        let mut current = owner;
        while let Ok(node) = self.node(current) {
            if let Some(list) = &node.content {
                list.notify();
            }
            if !node.capabilities.is_transparent() {
                break;
            }
            match node.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
    }
}
