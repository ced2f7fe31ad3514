use std::io;

/// Errors that can occur during sidelint analysis
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("Descriptor error: {0}")]
    DescriptorError(String),

    #[error("Module error: {0}")]
    ModuleError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for sidelint operations
pub type Result<T> = std::result::Result<T, Error>;
