/// roundshape core library - rounded polygon tessellation
///
/// This library provides the stateless tessellator that turns anchors with
/// per-corner radii into a filled mesh and an outline, plus shape presets,
/// the `.shape` text format and an editable shape model for front ends.

pub mod error;
pub mod format;
pub mod geometry;
pub mod preset;
pub mod shape;
pub mod style;
pub mod tessellate;
pub mod transform;
pub mod viewport;

// Re-export commonly used types
pub use error::{InvalidInputError, ParseError};
pub use geometry::{Anchor, Bounds, CornerSpec, OutlineVertex, ShapeSpec, TessellationResult};
pub use preset::Preset;
pub use shape::{ColliderSource, Shape, ShapeEvent};
pub use style::{FillType, Style};
pub use tessellate::tessellate;
pub use transform::Transform2;
pub use viewport::Viewport;
