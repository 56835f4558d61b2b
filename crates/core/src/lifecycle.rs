//! Phase propagation.
//!
//! Every phase runs the component's own hook first and then the same phase on
//! each child in list order. Loops walk a snapshot of the child ids taken when
//! the loop starts and skip entries that have left the list in the meantime.
//! Components inserted by a hook are not visited by the running loop; the
//! inserting component brings them up to the current phase itself (see
//! `ForEach` and `Fragment`).

use crate::capability::Capabilities;
use crate::context::{DataContext, InitContext, LayoutContext, LoadContext, RenderContext};
use crate::error::{DocumentError, Result};
use crate::trace::{TraceLevel, TraceLog};
use crate::tree::ComponentTree;
use quire_types::ComponentId;

/// How far a component has progressed. Phases may skip states but never go back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LifecycleState {
    #[default]
    Unattached,
    Initialized,
    Loaded,
    Bound,
    LayoutRegistered,
    Rendered,
    Disposed,
}

fn advance(tree: &mut ComponentTree, id: ComponentId, requested: LifecycleState) -> Result<()> {
    let node = tree.node_mut(id)?;
    let current = node.state;
    if current == LifecycleState::Disposed {
        return Err(DocumentError::ComponentDisposed(id));
    }
    if requested < current {
        return Err(DocumentError::PhaseOrder {
            component: node.id.clone(),
            current,
            requested,
        });
    }
    node.state = requested;
    Ok(())
}

/// Child ids still parented by `id` at the moment they are visited.
fn for_each_child(
    tree: &mut ComponentTree,
    id: ComponentId,
    mut f: impl FnMut(&mut ComponentTree, ComponentId) -> Result<()>,
) -> Result<()> {
    if !tree.has_content(id) {
        return Ok(());
    }
    let snapshot = tree.children(id).to_vec();
    for child in snapshot {
        if tree.parent(child) == Some(id) {
            f(tree, child)?;
        }
    }
    Ok(())
}

fn trace_begin(tree: &ComponentTree, log: &TraceLog, phase: &str, id: ComponentId) {
    if log.should_log(TraceLevel::Debug) {
        let uid = tree.unique_id(id).unwrap_or_default();
        log.begin(TraceLevel::Debug, phase, &format!("{} component '{}'", phase, uid));
    }
}

fn trace_end(tree: &ComponentTree, log: &TraceLog, phase: &str, id: ComponentId) {
    if log.should_log(TraceLevel::Debug) {
        let uid = tree.unique_id(id).unwrap_or_default();
        log.end(TraceLevel::Debug, phase, &format!("{} complete '{}'", phase, uid));
    }
}

pub fn init(tree: &mut ComponentTree, id: ComponentId, ctx: &mut InitContext<'_>) -> Result<()> {
    advance(tree, id, LifecycleState::Initialized)?;
    let log = ctx.trace_log;
    trace_begin(tree, log, "Init", id);
    let result = tree
        .with_behavior(id, |c, tree| c.on_init(tree, id, ctx))
        .and_then(|()| for_each_child(tree, id, |tree, child| init(tree, child, ctx)));
    trace_end(tree, log, "Init", id);
    result
}

pub fn load(tree: &mut ComponentTree, id: ComponentId, ctx: &mut LoadContext<'_>) -> Result<()> {
    advance(tree, id, LifecycleState::Loaded)?;
    let log = ctx.trace_log;
    trace_begin(tree, log, "Load", id);
    let result = tree
        .with_behavior(id, |c, tree| c.on_load(tree, id, ctx))
        .and_then(|()| for_each_child(tree, id, |tree, child| load(tree, child, ctx)));
    trace_end(tree, log, "Load", id);
    result
}

/// Binds the component and, when `include_children` is set, its whole subtree.
///
/// Failures that are already [`DocumentError::DataBinding`] pass through. In lax
/// mode an external failure is written to the trace log and binding carries on;
/// anything else is wrapped with the failing component's id.
pub fn data_bind(
    tree: &mut ComponentTree,
    id: ComponentId,
    ctx: &mut DataContext<'_>,
    include_children: bool,
) -> Result<()> {
    advance(tree, id, LifecycleState::Bound)?;
    if tree.node(id)?.capabilities.contains(Capabilities::BINDABLE) {
        let log = ctx.trace_log;
        trace_begin(tree, log, "Data Bind", id);
        let result = tree
            .with_behavior(id, |c, tree| c.on_data_bind(tree, id, ctx))
            .or_else(|err| handle_bind_error(tree, id, ctx, err));
        trace_end(tree, log, "Data Bind", id);
        result?;
    }
    if include_children {
        for_each_child(tree, id, |tree, child| data_bind(tree, child, ctx, true))?;
    }
    Ok(())
}

fn handle_bind_error(
    tree: &ComponentTree,
    id: ComponentId,
    ctx: &DataContext<'_>,
    err: DocumentError,
) -> Result<()> {
    if err.is_data_binding() {
        return Err(err);
    }
    let component = tree.node(id).map(|n| n.id.clone()).unwrap_or_else(|_| id.to_string());
    if err.is_external() && !ctx.is_strict() {
        ctx.trace_log.add_error(
            TraceLevel::Warning,
            "Data Bind",
            &DocumentError::DataBinding {
                component,
                source: Box::new(err),
            },
        );
        return Ok(());
    }
    Err(DocumentError::DataBinding {
        component,
        source: Box::new(err),
    })
}

/// Binds each id in order, skipping any that were disposed by an earlier one.
pub fn data_bind_all(
    tree: &mut ComponentTree,
    ids: &[ComponentId],
    ctx: &mut DataContext<'_>,
    include_children: bool,
) -> Result<()> {
    for id in ids.iter().copied() {
        if tree.contains(id) {
            data_bind(tree, id, ctx, include_children)?;
        }
    }
    Ok(())
}

pub fn register_pre_layout(
    tree: &mut ComponentTree,
    id: ComponentId,
    ctx: &mut LayoutContext<'_>,
) -> Result<()> {
    advance(tree, id, LifecycleState::LayoutRegistered)?;
    if let Some(title) = tree.node(id)?.outline_title.clone() {
        ctx.artefacts.open(crate::layout::OUTLINE_ARTEFACT, id, title);
    }
    tree.with_behavior(id, |c, tree| c.on_pre_layout(tree, id, ctx))?;
    for_each_child(tree, id, |tree, child| register_pre_layout(tree, child, ctx))
}

pub fn register_layout_complete(
    tree: &mut ComponentTree,
    id: ComponentId,
    ctx: &mut LayoutContext<'_>,
) -> Result<()> {
    advance(tree, id, LifecycleState::LayoutRegistered)?;
    tree.with_behavior(id, |c, tree| c.on_layout_complete(tree, id, ctx))?;
    for_each_child(tree, id, |tree, child| register_layout_complete(tree, child, ctx))?;
    if tree.node(id)?.outline_title.is_some() {
        ctx.artefacts.close(crate::layout::OUTLINE_ARTEFACT, id)?;
    }
    Ok(())
}

pub fn register_pre_render(
    tree: &mut ComponentTree,
    id: ComponentId,
    ctx: &mut RenderContext<'_>,
) -> Result<()> {
    advance(tree, id, LifecycleState::Rendered)?;
    tree.with_behavior(id, |c, tree| c.on_pre_render(tree, id, ctx))?;
    for_each_child(tree, id, |tree, child| register_pre_render(tree, child, ctx))
}

pub fn register_post_render(
    tree: &mut ComponentTree,
    id: ComponentId,
    ctx: &mut RenderContext<'_>,
) -> Result<()> {
    advance(tree, id, LifecycleState::Rendered)?;
    tree.with_behavior(id, |c, tree| c.on_post_render(tree, id, ctx))?;
    for_each_child(tree, id, |tree, child| register_post_render(tree, child, ctx))
}

/// Tears the subtree down children first, detaches the component from its
/// parent list and frees its slot.
pub fn dispose(tree: &mut ComponentTree, id: ComponentId) -> Result<()> {
    if tree.node(id)?.state == LifecycleState::Disposed {
        return Err(DocumentError::ComponentDisposed(id));
    }
    for_each_child(tree, id, dispose)?;
    tree.node_mut(id)?.state = LifecycleState::Disposed;
    tree.with_behavior(id, |c, tree| {
        c.on_dispose(tree, id);
        Ok(())
    })?;
    if let Some(parent) = tree.parent(id) {
        if tree.content(parent).is_some_and(|list| list.contains(id)) {
            tree.content_mut(parent)?.remove(id)?;
        }
    }
    if tree.root() == Some(id) {
        tree.unregister_subtree(id);
    }
    log::trace!("Disposed {}", id);
    tree.release(id);
    Ok(())
}
