use thiserror::Error;

/// The source table does not have the shape the dashboard expects.
///
/// Fatal at load time: the application keeps whatever dataset it had
/// rather than starting with partial data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInputError {
    #[error("missing identifier column '{0}'")]
    MissingColumn(String),

    #[error("no value columns start with prefix '{prefix}'")]
    NoValueColumns { prefix: String },
}
