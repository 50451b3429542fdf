//! Generation-time errors: a malformed schema aborts the run.

/// Errors raised while loading a schema or synthesizing code from it.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Schema JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unresolved type: argument {argument} of {class}.{method} has neither a type nor a domain")]
    UnresolvedType {
        class: String,
        method: String,
        argument: String,
    },
    #[error("Unknown domain: {domain} (argument {argument})")]
    UnknownDomain { domain: String, argument: String },
    #[error("Unknown primitive type: {0}")]
    UnknownPrimitiveType(String),
    #[error("Duplicate class id {id}: {first} and {second}")]
    DuplicateClassId { id: u16, first: String, second: String },
    #[error("Duplicate method id {id} in class {class}: {first} and {second}")]
    DuplicateMethodId {
        class: String,
        id: u16,
        first: String,
        second: String,
    },
    #[error("Duplicate domain: {0}")]
    DuplicateDomain(String),
    #[error("Method {class}.{method} names unknown response method {response}")]
    UnknownResponse {
        class: String,
        method: String,
        response: String,
    },
    #[error("Default value for {argument} is not a valid {primitive}")]
    IncompatibleDefault { argument: String, primitive: String },
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("Name collision: {kind} `{name}` is produced by both {first} and {second}")]
    DuplicateName {
        kind: &'static str,
        name: String,
        first: String,
        second: String,
    },
}
