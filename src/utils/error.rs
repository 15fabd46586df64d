use std::error::Error;
use std::fmt;
use std::io;

/// Common result type for Kalem operations
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

/// Error types for Kalem operations
#[derive(Debug)]
pub enum KalemError {
    /// IO error wrapper
    Io(io::Error),
    /// Configuration error
    Config(String),
    /// Post/topic store error (corrupt file, uniqueness violation)
    Store(String),
    /// A post or topic that does not exist
    NotFound(String),
    /// Rejected input (missing title, duplicate topic name, ...)
    Validation(String),
    /// Front matter parsing error
    FrontMatter(String),
    /// Generic error message
    Generic(String),
}

impl fmt::Display for KalemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KalemError::Io(err) => write!(f, "IO error: {}", err),
            KalemError::Config(msg) => write!(f, "Configuration error: {}", msg),
            KalemError::Store(msg) => write!(f, "Store error: {}", msg),
            KalemError::NotFound(what) => write!(f, "Not found: {}", what),
            KalemError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            KalemError::FrontMatter(msg) => write!(f, "Front matter error: {}", msg),
            KalemError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for KalemError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            KalemError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for KalemError {
    fn from(err: io::Error) -> Self {
        KalemError::Io(err)
    }
}

impl From<String> for KalemError {
    fn from(msg: String) -> Self {
        KalemError::Generic(msg)
    }
}

impl From<&str> for KalemError {
    fn from(msg: &str) -> Self {
        KalemError::Generic(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = KalemError::NotFound("post 'giris'".to_string());
        assert_eq!(err.to_string(), "Not found: post 'giris'");

        let err: KalemError = "plain".into();
        assert_eq!(err.to_string(), "plain");
    }

    #[test]
    fn test_io_source_is_kept() {
        let err = KalemError::from(io::Error::new(io::ErrorKind::Other, "disk"));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_boxes_into_box_result() {
        fn fails() -> BoxResult<()> {
            Err(KalemError::Validation("title is required".to_string()).into())
        }
        let err = fails().unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: title is required");
    }
}
