//! Collaborator interfaces that sit outside the component engine:
//! resource loading and the render writer.

pub mod render;
pub mod resource;

pub use render::{GraphicsPath, ObjectReference, PathOp, RenderError, RenderWriter};
pub use resource::{
    FilesystemResourceProvider, InMemoryResourceProvider, ResourceError, ResourceProvider,
    SharedResourceData,
};
