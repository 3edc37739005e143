use std::io;

use thiserror::Error;

/// Union of everything that can go wrong on a connection, for callers that
/// drive both directions through one error type.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

/// Errors raised while decoding an incoming message.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("header section of {current_size} bytes exceeds the {max_size} byte limit")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("more than {max_num} headers in the header section")]
    TooManyHeaders { max_num: usize },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("invalid http version: {reason}")]
    InvalidVersion { reason: String },

    #[error("invalid http method")]
    InvalidMethod,

    #[error("invalid http uri")]
    InvalidUri,

    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub(crate) fn too_large_header(current_size: usize, max_size: usize) -> Self {
        ParseError::TooLargeHeader {
            current_size,
            max_size,
        }
    }

    pub(crate) fn too_many_headers(max_num: usize) -> Self {
        ParseError::TooManyHeaders { max_num }
    }

    pub(crate) fn invalid_header(reason: impl Into<String>) -> Self {
        ParseError::InvalidHeader {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_version(reason: impl Into<String>) -> Self {
        ParseError::InvalidVersion {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_body(reason: impl Into<String>) -> Self {
        ParseError::InvalidBody {
            reason: reason.into(),
        }
    }
}

/// Errors raised while encoding an outgoing message.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },

    #[error("unsupported http version: {version}")]
    UnsupportedVersion { version: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub(crate) fn invalid_body(reason: impl Into<String>) -> Self {
        SendError::InvalidBody {
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported_version(version: impl Into<String>) -> Self {
        SendError::UnsupportedVersion {
            version: version.into(),
        }
    }
}
