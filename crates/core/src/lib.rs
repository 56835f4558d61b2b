//! # quire-core
//!
//! The component tree engine behind quire documents.
//!
//! - **tree**: arena storage of components, name registry and id generation
//! - **list** / **wrapping**: ordered child lists and the typed, flattened
//!   views derived from them
//! - **lifecycle**: phase propagation from init to dispose
//! - **styling**: full-style resolution through base layers, stylesheets and
//!   inheritance
//! - **components**: the built-in component types
//! - **document**: the driver that runs a whole generation pass
//!
//! Layout engines, markup parsers, templates and page writers are external and
//! plug in through the traits in `layout`, `parser`, `template` and
//! `quire_traits`.

// Re-export foundation crates
pub use quire_style as style;
pub use quire_traits as traits;
pub use quire_types as types;

pub mod capability;
pub mod component;
pub mod components;
pub mod context;
pub mod document;
pub mod error;
pub mod layout;
pub mod lifecycle;
pub mod list;
pub mod parser;
pub mod perf;
pub mod styling;
pub mod template;
pub mod trace;
pub mod tree;
pub mod wrapping;

pub use capability::Capabilities;
pub use component::{AsAny, Component, ComponentNode, LoadType, COMPONENT_LAYER};
pub use context::{
    ConformanceMode, ContextBase, DataContext, InitContext, ItemCollection, LayoutContext,
    LoadContext, OutputCompression, OutputFormat, RenderContext, RenderOptions,
};
pub use document::{Document, GenerationStage};
pub use error::{DocumentError, Result};
pub use layout::{
    ArtefactEntry, ArtefactRegistry, LayoutEngine, LayoutEngineFactory, OUTLINE_ARTEFACT,
};
pub use lifecycle::LifecycleState;
pub use list::{ComponentList, ContentMut};
pub use parser::{MarkupParser, ParseResult};
pub use perf::{PerformanceMonitor, PerformanceStage};
pub use styling::StyleResolver;
pub use template::{FnTemplate, Template};
pub use trace::{TraceEntry, TraceLevel, TraceLog, TraceRecordLevel};
pub use tree::ComponentTree;
pub use wrapping::{AnyComponent, ComponentFilter, ComponentWrappingList};

pub use quire_types::{Color, ComponentId, ObjectType, Point, Rect, Size};
