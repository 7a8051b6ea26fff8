use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrreryError {
    /// A caller handed us a degenerate value (non-positive radius,
    /// zero-sized output surface, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The host display could not be created. Fatal at startup.
    #[error("graphics unavailable: {0}")]
    GraphicsUnavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
