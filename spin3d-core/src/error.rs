/// Error taxonomy for the rendering pipeline
use thiserror::Error;

/// Configuration errors raised while validating a shape description.
///
/// These are fatal and raised once at mesh-build time; a validated mesh
/// cannot fail during per-frame updates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("face {face} references vertex {index}, but shape has {len} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        len: usize,
    },

    #[error("shape has {positions} positions but {colors} colors")]
    ColorCountMismatch { positions: usize, colors: usize },
}

/// Errors surfaced by a graphics-context collaborator.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("drawing surface unavailable: {0}")]
    Unsupported(String),

    #[error("missing uniform: {0}")]
    MissingUniform(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Top-level error for pipeline construction and ticking.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Context(#[from] ContextError),
}
