pub type MetadataResult<T, E = MetadataError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// A required piece of the table metadata (usually the entity name) was never set.
    #[error("incomplete metadata: {0}")]
    IncompleteMetadata(String),

    #[error("invalid declaration `{path}`: {reason}")]
    InvalidDeclaration { path: String, reason: String },
}
