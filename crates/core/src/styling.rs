//! Style resolution for components in a tree.

use crate::error::Result;
use crate::tree::ComponentTree;
use quire_style::{resolve_full_style, Style, Stylesheet};
use quire_types::ComponentId;
use std::collections::HashMap;

/// Resolves and memoises full styles for one layout or render pass.
///
/// Full styles depend on the parent chain, so the memo must not outlive a
/// pass that may restructure the tree. Base styles are recomputed every time.
#[derive(Debug, Default)]
pub struct StyleResolver {
    full: HashMap<ComponentId, Style>,
}

impl StyleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base style with stylesheet matches and the explicit override applied,
    /// before inheritance.
    pub fn applied_style(
        tree: &ComponentTree,
        id: ComponentId,
        stylesheet: &Stylesheet,
    ) -> Result<Style> {
        let node = tree.node(id)?;
        let mut declared = stylesheet.matching(node.style_class(), node.id());
        if let Some(explicit) = node.style() {
            declared.push(explicit);
        }
        Ok(resolve_full_style(node.style_layer().base_style(), &declared, None))
    }

    /// Applied style with inheritable properties filled from the parent chain.
    pub fn full_style(
        &mut self,
        tree: &ComponentTree,
        id: ComponentId,
        stylesheet: &Stylesheet,
    ) -> Result<Style> {
        if let Some(style) = self.full.get(&id) {
            return Ok(style.clone());
        }
        let parent_full = match tree.node(id)?.parent() {
            Some(parent) => Some(self.full_style(tree, parent, stylesheet)?),
            None => None,
        };
        let mut style = Self::applied_style(tree, id, stylesheet)?;
        if let Some(parent) = &parent_full {
            style.inherit_from(parent);
        }
        self.full.insert(id, style.clone());
        Ok(style)
    }

    pub fn invalidate(&mut self, id: ComponentId) {
        self.full.remove(&id);
    }

    pub fn clear(&mut self) {
        self.full.clear();
    }

    pub fn len(&self) -> usize {
        self.full.len()
    }

    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }
}
