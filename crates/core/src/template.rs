//! Templates that generate components on demand.

use crate::context::{DataContext, InitContext, LoadContext};
use crate::component::LoadType;
use crate::error::Result;
use crate::lifecycle;
use crate::tree::ComponentTree;
use quire_types::ComponentId;
use std::fmt;

/// Produces fresh, unattached components for one generated item.
pub trait Template: fmt::Debug {
    fn instantiate(
        &self,
        generation_index: usize,
        owner: ComponentId,
        tree: &mut ComponentTree,
    ) -> Result<Vec<ComponentId>>;
}

/// A template backed by a closure.
pub struct FnTemplate<F> {
    name: &'static str,
    build: F,
}

impl<F> FnTemplate<F>
where
    F: Fn(usize, ComponentId, &mut ComponentTree) -> Result<Vec<ComponentId>>,
{
    pub fn new(name: &'static str, build: F) -> Self {
        Self { name, build }
    }
}

impl<F> Template for FnTemplate<F>
where
    F: Fn(usize, ComponentId, &mut ComponentTree) -> Result<Vec<ComponentId>>,
{
    fn instantiate(
        &self,
        generation_index: usize,
        owner: ComponentId,
        tree: &mut ComponentTree,
    ) -> Result<Vec<ComponentId>> {
        (self.build)(generation_index, owner, tree)
    }
}

impl<F> fmt::Debug for FnTemplate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnTemplate").field(&self.name).finish()
    }
}

/// Instantiates `template`, inserts the instances into `container` from
/// `insert_index` onwards and drives them through init, load and data bind.
///
/// If any step fails the instances are disposed again, so the container never
/// keeps instances its owner does not know about.
pub fn materialize(
    tree: &mut ComponentTree,
    template: &dyn Template,
    generation_index: usize,
    owner: ComponentId,
    container: ComponentId,
    insert_index: usize,
    ctx: &mut DataContext<'_>,
) -> Result<Vec<ComponentId>> {
    let instances = template.instantiate(generation_index, owner, tree)?;
    match bring_up(tree, &instances, container, insert_index, ctx) {
        Ok(()) => Ok(instances),
        Err(err) => {
            for item in &instances {
                if !tree.contains(*item) {
                    continue;
                }
                if let Err(dispose_err) = lifecycle::dispose(tree, *item) {
                    log::warn!("Could not roll back template instance {}: {}", item, dispose_err);
                }
            }
            Err(err)
        }
    }
}

fn bring_up(
    tree: &mut ComponentTree,
    instances: &[ComponentId],
    container: ComponentId,
    insert_index: usize,
    ctx: &mut DataContext<'_>,
) -> Result<()> {
    {
        let mut content = tree.content_mut(container)?;
        for (offset, item) in instances.iter().enumerate() {
            content.insert(insert_index + offset, *item)?;
        }
    }
    for item in instances {
        let node = tree.node_mut(*item)?;
        if node.load_type() == LoadType::Inherited {
            node.set_load_type(LoadType::Template);
        }
    }

    let mut init_ctx = InitContext::new(ctx.base);
    for item in instances {
        lifecycle::init(tree, *item, &mut init_ctx)?;
    }
    let mut load_ctx = LoadContext::new(ctx.base);
    for item in instances {
        lifecycle::load(tree, *item, &mut load_ctx)?;
    }
    lifecycle::data_bind_all(tree, instances, ctx, true)
}
