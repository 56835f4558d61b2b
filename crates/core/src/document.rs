//! The document driver.
//!
//! A [`Document`] owns the component tree and the services every phase needs,
//! and runs the phases in order against the root: init and load, data bind,
//! layout, render and finally dispose.

use crate::component::Component;
use crate::components::DocumentRoot;
use crate::context::{
    ContextBase, DataContext, InitContext, ItemCollection, LayoutContext, LoadContext,
    RenderContext, RenderOptions,
};
use crate::error::{DocumentError, Result};
use crate::layout::{layout_viewports, ArtefactRegistry, LayoutEngineFactory};
use crate::lifecycle;
use crate::parser::MarkupParser;
use crate::perf::{PerformanceMonitor, PerformanceStage};
use crate::trace::{TraceLevel, TraceLog, TraceRecordLevel};
use crate::tree::ComponentTree;
use quire_style::Stylesheet;
use quire_traits::{InMemoryResourceProvider, ObjectReference, RenderWriter, ResourceProvider};
use quire_types::ComponentId;
use std::sync::Arc;

/// How far generation has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum GenerationStage {
    #[default]
    Created,
    Initialized,
    Loaded,
    Bound,
    LaidOut,
    Rendered,
    Disposed,
}

struct Services {
    trace_log: TraceLog,
    performance: PerformanceMonitor,
    options: RenderOptions,
    params: ItemCollection,
    stylesheet: Stylesheet,
    resources: Arc<dyn ResourceProvider>,
    parser: Option<Box<dyn MarkupParser>>,
}

impl Services {
    fn base(&self) -> ContextBase<'_> {
        ContextBase {
            trace_log: &self.trace_log,
            performance: &self.performance,
            options: &self.options,
            items: &self.params,
            resources: &*self.resources,
            stylesheet: &self.stylesheet,
            parser: self.parser.as_deref(),
        }
    }
}

/// Runs one stage with timing and a trace section. In lax mode an external
/// failure is recorded and the stage reports `fallback` instead.
fn run_stage<R>(
    base: ContextBase<'_>,
    stage: PerformanceStage,
    category: &str,
    fallback: R,
    f: impl FnOnce() -> Result<R>,
) -> Result<R> {
    base.performance.begin(stage);
    base.trace_log.begin(TraceLevel::Verbose, category, &format!("{} started", category));
    let result = f();
    base.trace_log.end(TraceLevel::Verbose, category, &format!("{} finished", category));
    base.performance.end(stage);

    match result {
        Err(err) if err.is_external() && !base.is_strict() => {
            base.trace_log.add_error(TraceLevel::Error, category, &err);
            log::warn!("{} continued after an error: {}", category, err);
            Ok(fallback)
        }
        Err(err) => {
            base.trace_log.add_error(TraceLevel::Failure, category, &err);
            Err(err)
        }
        ok => ok,
    }
}

pub struct Document {
    tree: ComponentTree,
    root: ComponentId,
    services: Services,
    artefacts: ArtefactRegistry,
    stage: GenerationStage,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_tree(ComponentTree::new())
    }

    /// Builds a document around an empty tree, e.g. one with a fixed id prefix.
    pub fn with_tree(mut tree: ComponentTree) -> Self {
        let root = tree.create(DocumentRoot);
        if let Err(err) = tree.set_root(root) {
            log::error!("Could not register the document root: {}", err);
        }
        Self {
            tree,
            root,
            services: Services {
                trace_log: TraceLog::default(),
                performance: PerformanceMonitor::default(),
                options: RenderOptions::default(),
                params: ItemCollection::new(),
                stylesheet: Stylesheet::default(),
                resources: Arc::new(InMemoryResourceProvider::new()),
                parser: None,
            },
            artefacts: ArtefactRegistry::default(),
            stage: GenerationStage::Created,
        }
    }

    // --- Configuration ---

    pub fn set_options(&mut self, options: RenderOptions) {
        self.services.options = options;
    }

    pub fn options(&self) -> &RenderOptions {
        &self.services.options
    }

    pub fn set_resources(&mut self, resources: Arc<dyn ResourceProvider>) {
        self.services.resources = resources;
    }

    pub fn set_parser(&mut self, parser: Box<dyn MarkupParser>) {
        self.services.parser = Some(parser);
    }

    pub fn set_stylesheet(&mut self, stylesheet: Stylesheet) {
        self.services.stylesheet = stylesheet;
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.services.stylesheet
    }

    pub fn set_trace_level(&mut self, level: TraceRecordLevel) {
        self.services.trace_log.set_record_level(level);
    }

    pub fn set_performance_enabled(&mut self, enabled: bool) {
        self.services.performance = PerformanceMonitor::new(enabled);
    }

    /// Parameters visible to data binding when no data item is current.
    pub fn params(&self) -> &ItemCollection {
        &self.services.params
    }

    pub fn params_mut(&mut self) -> &mut ItemCollection {
        &mut self.services.params
    }

    // --- Access ---

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    pub fn root(&self) -> ComponentId {
        self.root
    }

    pub fn trace_log(&self) -> &TraceLog {
        &self.services.trace_log
    }

    pub fn performance(&self) -> &PerformanceMonitor {
        &self.services.performance
    }

    /// Outline and other entries registered by the last layout pass.
    pub fn artefacts(&self) -> &ArtefactRegistry {
        &self.artefacts
    }

    pub fn stage(&self) -> GenerationStage {
        self.stage
    }

    /// Creates a component and appends it to the document root.
    pub fn add(&mut self, component: impl Component) -> Result<ComponentId> {
        let id = self.tree.create(component);
        self.tree.content_mut(self.root)?.add(id)?;
        Ok(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<ComponentId> {
        self.tree.lookup_name(name)
    }

    pub fn find_by_id(&self, id: &str) -> Option<ComponentId> {
        self.tree.find_by_id(self.root, id)
    }

    fn ensure_live(&self) -> Result<()> {
        if self.stage == GenerationStage::Disposed {
            return Err(DocumentError::ComponentDisposed(self.root));
        }
        Ok(())
    }

    // --- Phases ---

    pub fn init_and_load(&mut self) -> Result<()> {
        self.ensure_live()?;
        let tree = &mut self.tree;
        let root = self.root;
        let base = self.services.base();

        run_stage(base, PerformanceStage::Init, "Init", (), || {
            lifecycle::init(tree, root, &mut InitContext::new(base))
        })?;
        self.stage = self.stage.max(GenerationStage::Initialized);

        run_stage(base, PerformanceStage::Load, "Load", (), || {
            lifecycle::load(tree, root, &mut LoadContext::new(base))
        })?;
        self.stage = self.stage.max(GenerationStage::Loaded);
        Ok(())
    }

    pub fn data_bind(&mut self) -> Result<()> {
        self.ensure_live()?;
        let tree = &mut self.tree;
        let root = self.root;
        let base = self.services.base();

        run_stage(base, PerformanceStage::DataBind, "Data Bind", (), || {
            lifecycle::data_bind(tree, root, &mut DataContext::new(base), true)
        })?;
        self.stage = self.stage.max(GenerationStage::Bound);
        Ok(())
    }

    /// Registers layout, runs an engine per viewport and completes layout.
    /// Returns the number of engines created.
    pub fn layout(&mut self, factory: &dyn LayoutEngineFactory) -> Result<usize> {
        self.ensure_live()?;
        let tree = &mut self.tree;
        let root = self.root;
        let base = self.services.base();
        let mut ctx = LayoutContext::new(base);

        let engines = run_stage(base, PerformanceStage::Layout, "Layout", 0, || {
            lifecycle::register_pre_layout(tree, root, &mut ctx)?;
            let engines = layout_viewports(tree, root, factory, None, &mut ctx)?;
            lifecycle::register_layout_complete(tree, root, &mut ctx)?;
            Ok(engines)
        })?;
        self.artefacts = ctx.artefacts;
        self.stage = self.stage.max(GenerationStage::LaidOut);
        Ok(engines)
    }

    /// Writes every visible component, depth first, and returns the references
    /// of the written objects in output order.
    pub fn render(&mut self, writer: &mut dyn RenderWriter) -> Result<Vec<ObjectReference>> {
        self.ensure_live()?;
        let tree = &mut self.tree;
        let root = self.root;
        let base = self.services.base();
        let mut ctx = RenderContext::new(base);

        let written = run_stage(base, PerformanceStage::Render, "Render", Vec::new(), || {
            lifecycle::register_pre_render(tree, root, &mut ctx)?;
            let mut written = Vec::new();
            render_component(tree, root, &mut ctx, writer, &mut written)?;
            lifecycle::register_post_render(tree, root, &mut ctx)?;
            Ok(written)
        })?;
        self.stage = self.stage.max(GenerationStage::Rendered);
        Ok(written)
    }

    /// Disposes the whole tree. Later phase calls fail.
    pub fn dispose(&mut self) -> Result<()> {
        self.ensure_live()?;
        let tree = &mut self.tree;
        let root = self.root;
        let base = self.services.base();
        run_stage(base, PerformanceStage::Dispose, "Dispose", (), || {
            lifecycle::dispose(tree, root)
        })?;
        self.stage = GenerationStage::Disposed;
        self.services.performance.log_summary();
        Ok(())
    }

    /// Runs init, load, data bind, layout and render.
    pub fn generate(
        &mut self,
        factory: &dyn LayoutEngineFactory,
        writer: &mut dyn RenderWriter,
    ) -> Result<Vec<ObjectReference>> {
        self.services
            .trace_log
            .begin(TraceLevel::Message, "Document", "Generation started");
        let result = self.generate_stages(factory, writer);
        self.services
            .trace_log
            .end(TraceLevel::Message, "Document", "Generation finished");
        result
    }

    fn generate_stages(
        &mut self,
        factory: &dyn LayoutEngineFactory,
        writer: &mut dyn RenderWriter,
    ) -> Result<Vec<ObjectReference>> {
        self.init_and_load()?;
        self.data_bind()?;
        self.layout(factory)?;
        self.render(writer)
    }
}

impl Drop for Document {
    fn drop(&mut self) {
        if self.stage != GenerationStage::Disposed {
            if let Err(err) = self.dispose() {
                log::warn!("Document dispose failed: {}", err);
            }
        }
    }
}

fn render_component(
    tree: &mut ComponentTree,
    id: ComponentId,
    ctx: &mut RenderContext<'_>,
    writer: &mut dyn RenderWriter,
    written: &mut Vec<ObjectReference>,
) -> Result<()> {
    let node = tree.node(id)?;
    if !node.is_visible() {
        return Ok(());
    }
    let has_content = node.has_content();

    let reference = tree.with_behavior(id, |c, tree| c.output_to_target(tree, id, ctx, writer))?;
    written.extend(reference);

    if has_content {
        let group = tree.unique_id(id)?;
        writer.begin_group(&group)?;
        for child in tree.children(id).to_vec() {
            render_component(tree, child, ctx, writer, written)?;
        }
        writer.end_group()?;
    }
    Ok(())
}
