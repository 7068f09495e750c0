//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = PostagError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum PostagError {
    InvalidTag(InvalidTagError),
    InvalidArgument(InvalidArgumentError),
    InvalidModel(InvalidModelError),
    DecodeError(bincode::error::DecodeError),
    EncodeError(bincode::error::EncodeError),
    IoError(std::io::Error),
}

impl PostagError {
    pub(crate) fn invalid_tag<S>(tag: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidTag(InvalidTagError { tag: tag.into() })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_model<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidModel(InvalidModelError { msg: msg.into() })
    }
}

impl fmt::Display for PostagError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidTag(e) => e.fmt(f),
            Self::InvalidArgument(e) => e.fmt(f),
            Self::InvalidModel(e) => e.fmt(f),
            Self::DecodeError(e) => e.fmt(f),
            Self::EncodeError(e) => e.fmt(f),
            Self::IoError(e) => e.fmt(f),
        }
    }
}

impl Error for PostagError {}

/// Error used when a tag is not in the tag set and not a sentinel.
#[derive(Debug)]
pub struct InvalidTagError {
    /// The offending tag.
    pub(crate) tag: String,
}

impl fmt::Display for InvalidTagError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidTagError: '{}' is not a valid tag", self.tag)
    }
}

impl Error for InvalidTagError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Error used when the model is invalid.
#[derive(Debug)]
pub struct InvalidModelError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidModelError: {}", self.msg)
    }
}

impl Error for InvalidModelError {}

impl From<bincode::error::DecodeError> for PostagError {
    fn from(error: bincode::error::DecodeError) -> Self {
        Self::DecodeError(error)
    }
}

impl From<bincode::error::EncodeError> for PostagError {
    fn from(error: bincode::error::EncodeError) -> Self {
        Self::EncodeError(error)
    }
}

impl From<std::io::Error> for PostagError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error)
    }
}
