/// Error types for shape tessellation and the shape text format
use thiserror::Error;

/// Input rejected by the tessellator. No partial result is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("a shape needs at least 3 anchors, got {count}")]
    TooFewAnchors { count: usize },

    #[error("per-anchor arrays differ in length: {anchors} anchors, {radii} radii, {smoothness} smoothness values")]
    LengthMismatch {
        anchors: usize,
        radii: usize,
        smoothness: usize,
    },
}

/// Failure to read a `.shape` description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed shape description near line {line}: {context}")]
    Syntax { line: usize, context: String },

    #[error("unexpected trailing input after 'endshape': {0}")]
    TrailingInput(String),
}
