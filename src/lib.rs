//! # quire
//!
//! Builds documents as trees of components and drives them through the
//! generation phases: init, load, data bind, layout, render and dispose.
//!
//! The engine lives in `quire-core`; this crate adds JSON configuration and a
//! one-call [`generate`] entry point.

pub mod config;
pub mod error;

pub use config::{GenerationOptions, GENERATED_AT_PARAM};
pub use error::GenerationError;

pub use quire_core::*;

use quire_core::traits::RenderWriter;

/// Creates a document from `options`, lets `build` populate it and runs every
/// phase up to render. The returned document has not been disposed yet, so its
/// tree, trace log and artefacts can still be inspected.
pub fn generate<F>(
    options: &GenerationOptions,
    build: F,
    factory: &dyn LayoutEngineFactory,
    writer: &mut dyn RenderWriter,
) -> Result<Document, GenerationError>
where
    F: FnOnce(&mut Document) -> std::result::Result<(), DocumentError>,
{
    let mut document = options.create_document()?;
    build(&mut document)?;
    let written = document.generate(factory, writer)?;
    log::info!(
        "Generated {} components into {} objects",
        document.tree().len(),
        written.len()
    );
    Ok(document)
}
