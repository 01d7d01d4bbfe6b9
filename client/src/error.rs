//! Error definitions and mappings
use std::path::PathBuf;

use awc::error::{PayloadError, SendRequestError};
use awc::http::StatusCode;
use backtrace::Backtrace as Trace; // needed b/c of thiserror magic
use thiserror::Error;

use crate::model::ErrorMessage;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed credentials: {msg}")]
    CredentialFormatError { msg: String },
    #[error("cannot read {}: {e}", .path.display())]
    FileAccessError { path: PathBuf, e: std::io::Error },
    #[error("request for {url} resulted in HTTP status code {code}: {msg}")]
    UpstreamError {
        code: StatusCode,
        url: String,
        msg: String,
    },
    #[error("JSON error: {0}")]
    EncodingError(#[from] serde_json::Error),
    #[error("invalid UTF8 string: {0}")]
    FromUtf8Error(#[from] std::string::FromUtf8Error),
    #[error("error requesting {url}: {e}")]
    SendRequestError { e: String, url: String, bt: Trace },
    #[error("timeout requesting {url}: {e}")]
    TimeoutError { e: String, url: String, bt: Trace },
    #[error("payload error: {e}")]
    PayloadError { e: PayloadError, bt: Trace },
    #[error("invalid API host: {0}")]
    InvalidAddress(#[from] url::ParseError),
    #[error("TLS setup error: {0}")]
    TlsError(#[from] openssl::error::ErrorStack),
}

impl Error {
    pub(crate) fn credentials(msg: impl Into<String>) -> Self {
        Error::CredentialFormatError { msg: msg.into() }
    }

    pub(crate) fn file_access(path: impl Into<PathBuf>, e: std::io::Error) -> Self {
        Error::FileAccessError {
            path: path.into(),
            e,
        }
    }
}

impl From<(SendRequestError, String)> for Error {
    fn from((e, url): (SendRequestError, String)) -> Self {
        match e {
            SendRequestError::Timeout => Error::TimeoutError {
                e: format!("{}", e),
                url,
                bt: Trace::new(),
            },
            e => Error::SendRequestError {
                e: format!("{}", e),
                url,
                bt: Trace::new(),
            },
        }
    }
}

impl From<PayloadError> for Error {
    fn from(e: PayloadError) -> Self {
        Error::PayloadError {
            e,
            bt: Trace::new(),
        }
    }
}

impl From<(StatusCode, String, ErrorMessage)> for Error {
    fn from((code, url, err_msg): (StatusCode, String, ErrorMessage)) -> Self {
        Error::UpstreamError {
            code,
            url,
            msg: err_msg.error.unwrap_or_default(),
        }
    }
}
