//! Layout collaborators and layout-time artefacts.

use crate::capability::Capabilities;
use crate::context::LayoutContext;
use crate::error::{DocumentError, Result};
use crate::tree::ComponentTree;
use quire_style::Style;
use quire_types::ComponentId;
use std::collections::HashMap;

/// Artefact kind used for outline (bookmark) entries.
pub const OUTLINE_ARTEFACT: &str = "outline";

/// Lays out one viewport component and its content.
pub trait LayoutEngine {
    fn layout(
        &mut self,
        tree: &mut ComponentTree,
        viewport: ComponentId,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<()>;

    fn name(&self) -> &str {
        "layout"
    }
}

/// Creates a layout engine for each viewport found in the layout pass.
pub trait LayoutEngineFactory {
    fn create_layout_engine(
        &self,
        parent: Option<&dyn LayoutEngine>,
        ctx: &LayoutContext<'_>,
        style: &Style,
    ) -> Box<dyn LayoutEngine>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactEntry {
    pub kind: String,
    pub owner: ComponentId,
    pub title: String,
    pub closed: bool,
}

/// Named entries opened during pre-layout and closed at layout complete.
#[derive(Debug, Default)]
pub struct ArtefactRegistry {
    entries: Vec<ArtefactEntry>,
    open: HashMap<(String, ComponentId), usize>,
}

impl ArtefactRegistry {
    pub fn open(&mut self, kind: &str, owner: ComponentId, title: impl Into<String>) {
        let key = (kind.to_string(), owner);
        if self.open.contains_key(&key) {
            return;
        }
        self.open.insert(key, self.entries.len());
        self.entries.push(ArtefactEntry {
            kind: kind.to_string(),
            owner,
            title: title.into(),
            closed: false,
        });
    }

    pub fn close(&mut self, kind: &str, owner: ComponentId) -> Result<()> {
        let index = self.open.remove(&(kind.to_string(), owner)).ok_or_else(|| {
            DocumentError::LayoutOrder(format!(
                "the {} entry for {} was closed before it was opened",
                kind, owner
            ))
        })?;
        if let Some(entry) = self.entries.get_mut(index) {
            entry.closed = true;
        }
        Ok(())
    }

    pub fn entries(&self) -> &[ArtefactEntry] {
        &self.entries
    }

    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ArtefactEntry> + 'a {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}

/// Creates and runs an engine for every visible viewport below (and including)
/// `id`. Nested viewports receive the enclosing engine as their parent.
/// Returns the number of engines created.
pub fn layout_viewports(
    tree: &mut ComponentTree,
    id: ComponentId,
    factory: &dyn LayoutEngineFactory,
    parent: Option<&dyn LayoutEngine>,
    ctx: &mut LayoutContext<'_>,
) -> Result<usize> {
    let node = tree.node(id)?;
    if !node.is_visible() {
        return Ok(0);
    }

    if node.capabilities().contains(Capabilities::VIEWPORT) {
        let style = ctx.styles.full_style(tree, id, ctx.base.stylesheet)?;
        let mut engine = factory.create_layout_engine(parent, ctx, &style);
        log::debug!("Laying out viewport {} with '{}'", id, engine.name());
        engine.layout(tree, id, ctx)?;
        let mut created = 1;
        for child in tree.children(id).to_vec() {
            created += layout_viewports(tree, child, factory, Some(&*engine), ctx)?;
        }
        Ok(created)
    } else {
        let mut created = 0;
        for child in tree.children(id).to_vec() {
            created += layout_viewports(tree, child, factory, parent, ctx)?;
        }
        Ok(created)
    }
}
