/// Error taxonomy shared by every service.
///
/// `NotFound` and `InvalidInput` are the two kinds a caller can act on and
/// map to 404 / 422 on the wire. `EventProcessing` marks a message that can
/// never be applied (wrong type, missing payload) and is fatal to that
/// message only. Anything else is `Internal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NotFound(String),
    InvalidInput(String),
    EventProcessing(String),
    Internal(String),
}

impl ApiError {
    /// The message carried to the caller in the HTTP error body.
    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg)
            | ApiError::InvalidInput(msg)
            | ApiError::EventProcessing(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            ApiError::InvalidInput(msg) => write!(f, "Invalid Input: {msg}"),
            ApiError::EventProcessing(msg) => write!(f, "Event Processing: {msg}"),
            ApiError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
