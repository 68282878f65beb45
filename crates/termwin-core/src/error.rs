use std::io;
use std::sync::Arc;

/// A failure reported by the terminal backend.
///
/// Cloneable so it can be carried inside [`crate::input::Event::Error`].
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
    #[source]
    source: Option<Arc<io::Error>>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn io_error(&self) -> Option<&io::Error> {
        self.source.as_deref()
    }
}

impl From<io::Error> for BackendError {
    fn from(err: io::Error) -> Self {
        Self {
            message: err.to_string(),
            source: Some(Arc::new(err)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("backend failure: {0}")]
    Backend(#[from] BackendError),

    #[error("row index {index} out of range ({len} rows)")]
    RowIndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_errors_keep_their_source() {
        let err = BackendError::from(io::Error::new(io::ErrorKind::BrokenPipe, "tty gone"));
        assert_eq!(err.message(), "tty gone");
        assert_eq!(err.io_error().map(io::Error::kind), Some(io::ErrorKind::BrokenPipe));
        assert!(err.source().is_some());

        let wrapped = Error::from(err);
        assert_eq!(wrapped.to_string(), "backend failure: tty gone");
    }

    #[test]
    fn out_of_range_message_names_index_and_len() {
        let err = Error::RowIndexOutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "row index 7 out of range (3 rows)");
    }
}
