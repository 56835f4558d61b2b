use crate::capability::Capabilities;
use crate::component::Component;
use crate::components::sibling_insertion_point;
use crate::context::{ContextBase, DataContext, InitContext, LayoutContext, LoadContext};
use crate::error::{DocumentError, Result};
use crate::lifecycle::{self, LifecycleState};
use crate::parser::insert_parsed;
use crate::trace::TraceLevel;
use crate::tree::ComponentTree;
use quire_types::{ComponentId, ObjectType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentSource {
    /// Markup held by the component itself
    Inline(String),
    /// Path fetched through the resource provider
    Path(String),
}

/// When the markup is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseStage {
    #[default]
    Load,
    PreLayout,
}

/// Embeds markup parsed by the document's markup parser. The parsed top-level
/// components are inserted into the enclosing container in place of the
/// fragment, which itself renders nothing.
#[derive(Debug)]
pub struct Fragment {
    source: FragmentSource,
    parse_at: ParseStage,
    added: Vec<ComponentId>,
}

impl Fragment {
    pub fn inline(markup: impl Into<String>) -> Self {
        Self::new(FragmentSource::Inline(markup.into()))
    }

    pub fn from_path(path: impl Into<String>) -> Self {
        Self::new(FragmentSource::Path(path.into()))
    }

    pub fn new(source: FragmentSource) -> Self {
        Self {
            source,
            parse_at: ParseStage::Load,
            added: Vec::new(),
        }
    }

    pub fn parse_at(mut self, stage: ParseStage) -> Self {
        self.parse_at = stage;
        self
    }

    pub fn added(&self) -> &[ComponentId] {
        &self.added
    }

    fn origin(&self) -> &str {
        match &self.source {
            FragmentSource::Inline(_) => "inline fragment",
            FragmentSource::Path(path) => path,
        }
    }

    /// Replaces previously parsed content with freshly parsed components and
    /// brings them through init and load.
    fn parse_into_container(
        &mut self,
        tree: &mut ComponentTree,
        id: ComponentId,
        base: ContextBase<'_>,
    ) -> Result<()> {
        self.discard_added(tree)?;

        let origin = self.origin().to_string();
        let markup = match &self.source {
            FragmentSource::Inline(markup) => markup.clone(),
            FragmentSource::Path(path) => base.resources.load_text(path)?,
        };
        if markup.trim().is_empty() {
            return Ok(());
        }
        let parser = base.parser.ok_or_else(|| DocumentError::Parse {
            origin: origin.clone(),
            message: "no markup parser is configured".to_string(),
        })?;

        let (container, index) = sibling_insertion_point(tree, id)?;
        let results = parser.parse(&origin, &markup, tree).map_err(|err| match err {
            err @ DocumentError::Parse { .. } => err,
            other => DocumentError::Parse {
                origin: origin.clone(),
                message: other.to_string(),
            },
        })?;
        self.added = insert_parsed(tree, &results, container, index, &origin)?;

        let mut init_ctx = InitContext::new(base);
        for item in &self.added {
            lifecycle::init(tree, *item, &mut init_ctx)?;
        }
        let mut load_ctx = LoadContext::new(base);
        for item in &self.added {
            lifecycle::load(tree, *item, &mut load_ctx)?;
        }
        log::debug!("Fragment {} added {} components from '{}'", id, self.added.len(), origin);
        Ok(())
    }

    fn discard_added(&mut self, tree: &mut ComponentTree) -> Result<()> {
        for previous in std::mem::take(&mut self.added) {
            if tree.contains(previous) {
                lifecycle::dispose(tree, previous)?;
            }
        }
        Ok(())
    }

    /// Strict documents fail on unreadable content; lax ones log it, drop
    /// whatever was inserted and hide the fragment.
    fn parse_with_policy(
        &mut self,
        tree: &mut ComponentTree,
        id: ComponentId,
        base: ContextBase<'_>,
    ) -> Result<bool> {
        match self.parse_into_container(tree, id, base) {
            Ok(()) => Ok(true),
            Err(err) if err.is_external() && !base.is_strict() => {
                base.trace_log.add_error(TraceLevel::Warning, "Fragment", &err);
                self.discard_added(tree)?;
                tree.node_mut(id)?.set_visible(false);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

impl Component for Fragment {
    fn object_type(&self) -> ObjectType {
        ObjectType::new("frag")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::BINDABLE | Capabilities::NO_OP
    }

    fn on_load(
        &mut self,
        tree: &mut ComponentTree,
        id: ComponentId,
        ctx: &mut LoadContext<'_>,
    ) -> Result<()> {
        if self.parse_at == ParseStage::Load {
            self.parse_with_policy(tree, id, ctx.base)?;
        }
        Ok(())
    }

    fn on_pre_layout(
        &mut self,
        tree: &mut ComponentTree,
        id: ComponentId,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<()> {
        if self.parse_at != ParseStage::PreLayout || !self.parse_with_policy(tree, id, ctx.base)? {
            return Ok(());
        }
        let added = self.added.clone();
        let mut data_ctx = DataContext::new(ctx.base);
        lifecycle::data_bind_all(tree, &added, &mut data_ctx, true)?;
        for item in added {
            if tree.node(item)?.state() < LifecycleState::LayoutRegistered {
                lifecycle::register_pre_layout(tree, item, ctx)?;
            }
        }
        Ok(())
    }
}
