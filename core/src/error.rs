use tablegen_attr::MetadataError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("statement `{method}` is already registered in scope `{scope}`")]
    RegistrationConflict { scope: String, method: String },

    #[error("incomplete metadata: {0}")]
    IncompleteMetadata(String),

    #[error("collection `{collection}` is empty")]
    EmptyCollection { collection: String },

    #[error("malformed statement template: {0}")]
    Template(String),

    #[error("tokenization error: {0}")]
    TokenizationError(#[from] sqlparser::tokenizer::TokenizerError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}
