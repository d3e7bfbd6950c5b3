use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// The request payload could not be decoded.
    InvalidRequest(String),
    /// The canvas could not place the requested content.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidRequest(msg) => write!(f, "invalid report request: {msg}"),
            Error::Render(msg) => write!(f, "failed to render report: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidRequest(e.to_string())
    }
}
