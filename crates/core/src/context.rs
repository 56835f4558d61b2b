//! Per-phase contexts.
//!
//! A context lives for a single phase call. The shared services sit in a
//! [`ContextBase`] of borrowed references; nested contexts for generated
//! content are built from the same base, so conformance and output settings
//! always match the outer pass.

use crate::layout::ArtefactRegistry;
use crate::parser::MarkupParser;
use crate::perf::PerformanceMonitor;
use crate::styling::StyleResolver;
use crate::trace::{TraceLevel, TraceLog};
use quire_style::Stylesheet;
use quire_traits::ResourceProvider;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Deref;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConformanceMode {
    /// Any failure aborts generation.
    #[default]
    Strict,
    /// External failures are logged and the offending content is skipped.
    Lax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputCompression {
    None,
    #[default]
    Compress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    PdfA,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    pub conformance: ConformanceMode,
    pub compression: OutputCompression,
    pub output_format: OutputFormat,
}

/// Document parameters made available to data binding.
pub type ItemCollection = serde_json::Map<String, Value>;

/// Services shared by every phase of one document pass.
#[derive(Clone, Copy)]
pub struct ContextBase<'a> {
    pub trace_log: &'a TraceLog,
    pub performance: &'a PerformanceMonitor,
    pub options: &'a RenderOptions,
    pub items: &'a ItemCollection,
    pub resources: &'a dyn ResourceProvider,
    pub stylesheet: &'a Stylesheet,
    pub parser: Option<&'a dyn MarkupParser>,
}

impl<'a> ContextBase<'a> {
    pub fn is_strict(&self) -> bool {
        self.options.conformance == ConformanceMode::Strict
    }

    pub fn should_log(&self, level: TraceLevel) -> bool {
        self.trace_log.should_log(level)
    }
}

macro_rules! deref_to_base {
    ($($ty:ident),*) => {
        $(
            impl<'a> Deref for $ty<'a> {
                type Target = ContextBase<'a>;

                fn deref(&self) -> &Self::Target {
                    &self.base
                }
            }
        )*
    };
}

pub struct InitContext<'a> {
    pub base: ContextBase<'a>,
}

impl<'a> InitContext<'a> {
    pub fn new(base: ContextBase<'a>) -> Self {
        Self { base }
    }
}

pub struct LoadContext<'a> {
    pub base: ContextBase<'a>,
}

impl<'a> LoadContext<'a> {
    pub fn new(base: ContextBase<'a>) -> Self {
        Self { base }
    }
}

/// Binding context with a stack of current data items.
pub struct DataContext<'a> {
    pub base: ContextBase<'a>,
    stack: Vec<(Value, usize)>,
}

impl<'a> DataContext<'a> {
    pub fn new(base: ContextBase<'a>) -> Self {
        Self {
            base,
            stack: Vec::new(),
        }
    }

    /// The innermost data item, or `None` outside any enumeration.
    pub fn current(&self) -> Option<&Value> {
        self.stack.last().map(|(value, _)| value)
    }

    /// Position of the current item within its enumeration
    pub fn current_index(&self) -> Option<usize> {
        self.stack.last().map(|(_, index)| *index)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, value: Value, index: usize) {
        self.stack.push((value, index));
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.stack.pop().map(|(value, _)| value)
    }

    /// Looks up a JSON pointer in the current item, or in the document
    /// parameters when no item is current.
    pub fn select(&self, pointer: &str) -> Option<Value> {
        match self.current() {
            Some(value) => value.pointer(pointer).cloned(),
            None => {
                let params = Value::Object(self.base.items.clone());
                params.pointer(pointer).cloned()
            }
        }
    }
}

pub struct LayoutContext<'a> {
    pub base: ContextBase<'a>,
    pub styles: StyleResolver,
    pub artefacts: ArtefactRegistry,
}

impl<'a> LayoutContext<'a> {
    pub fn new(base: ContextBase<'a>) -> Self {
        Self {
            base,
            styles: StyleResolver::new(),
            artefacts: ArtefactRegistry::default(),
        }
    }
}

pub struct RenderContext<'a> {
    pub base: ContextBase<'a>,
    pub styles: StyleResolver,
}

impl<'a> RenderContext<'a> {
    pub fn new(base: ContextBase<'a>) -> Self {
        Self {
            base,
            styles: StyleResolver::new(),
        }
    }
}

deref_to_base!(InitContext, LoadContext, DataContext, LayoutContext, RenderContext);

/// Owns the services a [`ContextBase`] borrows, for unit tests.
#[cfg(test)]
pub(crate) struct ContextFixture {
    pub trace_log: TraceLog,
    pub performance: PerformanceMonitor,
    pub options: RenderOptions,
    pub items: ItemCollection,
    pub resources: quire_traits::InMemoryResourceProvider,
    pub stylesheet: Stylesheet,
}

#[cfg(test)]
impl Default for ContextFixture {
    fn default() -> Self {
        Self {
            trace_log: TraceLog::new(crate::trace::TraceRecordLevel::All),
            performance: PerformanceMonitor::disabled(),
            options: RenderOptions::default(),
            items: ItemCollection::new(),
            resources: quire_traits::InMemoryResourceProvider::new(),
            stylesheet: Stylesheet::default(),
        }
    }
}

#[cfg(test)]
impl ContextFixture {
    pub fn lax() -> Self {
        Self {
            options: RenderOptions {
                conformance: ConformanceMode::Lax,
                ..RenderOptions::default()
            },
            ..Self::default()
        }
    }

    pub fn base(&self) -> ContextBase<'_> {
        ContextBase {
            trace_log: &self.trace_log,
            performance: &self.performance,
            options: &self.options,
            items: &self.items,
            resources: &self.resources,
            stylesheet: &self.stylesheet,
            parser: None,
        }
    }
}
