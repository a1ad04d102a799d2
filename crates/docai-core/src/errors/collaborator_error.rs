/// Errors raised by external services at the system boundary.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("http status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}
