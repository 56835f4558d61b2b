//! Built-in component types.

mod data;
mod fragment;
mod image;
mod list;
mod panel;
mod placeholder;
mod root;
mod shape;
mod table;
mod text;

pub use data::{DataSource, ForEach};
pub use fragment::{Fragment, FragmentSource, ParseStage};
pub use image::Image;
pub use list::{ListBlock, ListItem};
pub use panel::{BlockQuote, Panel, PANEL_LAYER};
pub use placeholder::{NoOp, PlaceHolder};
pub use root::{DocumentRoot, Page, DOCUMENT_LAYER};
pub use shape::{Shape, ShapeKind};
pub use table::{RowKind, Table, TableCell, TableRow};
pub use text::{Heading, Paragraph, Span, TextLiteral};

use crate::error::{DocumentError, Result};
use crate::tree::ComponentTree;
use quire_types::ComponentId;

/// Container and list position where generated or parsed siblings of `id`
/// are inserted: immediately before `id` in its nearest container.
pub(crate) fn sibling_insertion_point(
    tree: &ComponentTree,
    id: ComponentId,
) -> Result<(ComponentId, usize)> {
    let missing = || DocumentError::ContainerParentNotFound {
        component: tree.node(id).map(|n| n.id().to_string()).unwrap_or_else(|_| id.to_string()),
    };
    let container = tree.container_parent(id).ok_or_else(missing)?;
    let anchor = std::iter::once(id)
        .chain(tree.ancestors(id))
        .find(|c| tree.parent(*c) == Some(container))
        .ok_or_else(missing)?;
    let index = tree
        .content(container)
        .and_then(|list| list.index_of(anchor))
        .ok_or_else(missing)?;
    Ok((container, index))
}
