//! Interface to an external markup parser and insertion of its output.

use crate::error::{DocumentError, Result};
use crate::component::LoadType;
use crate::lifecycle;
use crate::tree::ComponentTree;
use quire_types::ComponentId;

/// One parser event: the start of a component, or the end of the most
/// recently started one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseResult {
    pub component: ComponentId,
    pub is_end: bool,
}

impl ParseResult {
    pub fn start(component: ComponentId) -> Self {
        Self {
            component,
            is_end: false,
        }
    }

    pub fn end(component: ComponentId) -> Self {
        Self {
            component,
            is_end: true,
        }
    }
}

/// Turns markup into unattached components created in `tree`.
///
/// Every start event must be balanced by an end event, leaves included.
pub trait MarkupParser {
    fn parse(
        &self,
        origin: &str,
        content: &str,
        tree: &mut ComponentTree,
    ) -> Result<Vec<ParseResult>>;
}

/// Inserts parsed components into `container` starting at `index`.
///
/// Top level components go straight into the container and are returned in
/// order; nested ones are added to the component that encloses them. The event
/// stream is checked before anything is inserted. On failure every component
/// named by `results` is disposed and the container is left as it was.
pub fn insert_parsed(
    tree: &mut ComponentTree,
    results: &[ParseResult],
    container: ComponentId,
    index: usize,
    origin: &str,
) -> Result<Vec<ComponentId>> {
    let inserted = check_balanced(results, origin)
        .and_then(|()| attach(tree, results, container, index, origin));
    if inserted.is_err() {
        discard(tree, results);
    }
    inserted
}

fn check_balanced(results: &[ParseResult], origin: &str) -> Result<()> {
    let mut depth = 0usize;
    for result in results {
        if !result.is_end {
            depth += 1;
            continue;
        }
        depth = depth.checked_sub(1).ok_or_else(|| DocumentError::Parse {
            origin: origin.to_string(),
            message: format!("unbalanced end of {}", result.component),
        })?;
    }
    Ok(())
}

fn attach(
    tree: &mut ComponentTree,
    results: &[ParseResult],
    container: ComponentId,
    mut index: usize,
    origin: &str,
) -> Result<Vec<ComponentId>> {
    let mut stack: Vec<ComponentId> = Vec::new();
    let mut added = Vec::new();

    for result in results {
        if result.is_end {
            stack.pop();
            continue;
        }

        let parsed = result.component;
        match stack.last() {
            None => {
                tree.content_mut(container)?.insert(index, parsed)?;
                index += 1;
                let node = tree.node_mut(parsed)?;
                node.set_loaded_source(origin);
                added.push(parsed);
            }
            Some(parent) => tree.content_mut(*parent)?.add(parsed)?,
        }
        let node = tree.node_mut(parsed)?;
        if node.load_type() == LoadType::Inherited {
            node.set_load_type(LoadType::Parsed);
        }
        stack.push(parsed);
    }
    Ok(added)
}

/// Disposes whatever the parser produced, inserted or not.
fn discard(tree: &mut ComponentTree, results: &[ParseResult]) {
    for result in results {
        if !tree.contains(result.component) {
            continue;
        }
        if let Err(err) = lifecycle::dispose(tree, result.component) {
            log::warn!("Could not discard parsed component {}: {}", result.component, err);
        }
    }
}
