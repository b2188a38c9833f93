use thiserror::Error;

/// Failures of a single send or attach operation. None of these end the
/// session; each is surfaced once (stderr notice or transcript entry) and the
/// user may retry.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Type a message or attach an image.")]
    EmptyInput,

    #[error("{0}")]
    Validation(String),

    #[error("Invalid image data")]
    InvalidImageData,

    #[error("No valid content to send")]
    EmptyRequest,

    #[error("{0}")]
    Api(String),

    #[error("The API response did not contain any text")]
    MalformedResponse,
}
