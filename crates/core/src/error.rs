//! Error type for every operation on the component tree and the document.

use crate::lifecycle::LifecycleState;
use quire_style::StyleParseError;
use quire_traits::{RenderError, ResourceError};
use quire_types::ComponentId;
use thiserror::Error;

pub type Result<T, E = DocumentError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum DocumentError {
    // Structural
    #[error("Index {index} is out of range for a list of {len} components")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("The no-op count of the list owned by {owner} cannot go below zero")]
    NoOpCountOutOfRange { owner: ComponentId },
    #[error("Component {0} cannot contain child components")]
    NotAContainer(ComponentId),
    #[error("Cannot place {child} inside {parent}: {reason}")]
    InvalidHierarchy {
        parent: ComponentId,
        child: ComponentId,
        reason: &'static str,
    },
    #[error("Unknown component {0}")]
    UnknownComponent(ComponentId),
    #[error("A component named '{0}' is already registered in this document")]
    DuplicateName(String),
    #[error("Component {0} is already executing a phase")]
    ComponentBusy(ComponentId),

    // Resolution
    #[error("Component '{component}' references data source '{source_id}' which was not found")]
    DataSourceNotFound { component: String, source_id: String },
    #[error("Component '{component}' references '{source_id}' which is not a data source")]
    NotADataSource { component: String, source_id: String },
    #[error("Component '{component}' does not have a container parent to add content to")]
    ContainerParentNotFound { component: String },

    // External resources
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error("Could not parse the content of '{origin}': {message}")]
    Parse { origin: String, message: String },
    #[error("Template instantiation failed: {0}")]
    Template(String),

    // Lifecycle ordering
    #[error("Component {0} has been disposed")]
    ComponentDisposed(ComponentId),
    #[error("Component '{component}' cannot move from {current:?} back to {requested:?}")]
    PhaseOrder {
        component: String,
        current: LifecycleState,
        requested: LifecycleState,
    },
    #[error("Layout ordering error: {0}")]
    LayoutOrder(String),

    #[error("Data binding failed for '{component}': {source}")]
    DataBinding {
        component: String,
        #[source]
        source: Box<DocumentError>,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Style(#[from] StyleParseError),
}

impl DocumentError {
    /// Failures caused by content from outside the document: missing files,
    /// unreadable markup, broken templates. Lax documents log these and carry on.
    pub fn is_external(&self) -> bool {
        match self {
            DocumentError::Resource(_)
            | DocumentError::Parse { .. }
            | DocumentError::Template(_) => true,
            DocumentError::DataBinding { source, .. } => source.is_external(),
            _ => false,
        }
    }

    pub fn is_data_binding(&self) -> bool {
        matches!(self, DocumentError::DataBinding { .. })
    }
}
