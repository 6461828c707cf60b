//! The workspace error type.
//!
//! Five kinds cover the whole surface: missing files, bad option
//! combinations, malformed documents, encryption, and contract violations
//! such as out-of-range page numbers. Collaborator errors are annotated
//! with the offending page number where one is known.

use std::fmt;
use std::path::PathBuf;

use tabulon_parse::ParseError;

/// Errors surfaced by document opening and extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The input path does not exist.
    FileNotFound(PathBuf),
    /// The extraction options violate a combination rule.
    InvalidOptions(String),
    /// The PDF bytes are malformed; `page` names the page being read when
    /// the failure happened mid-document.
    InvalidPdf {
        page: Option<usize>,
        message: String,
    },
    /// The document is encrypted and the password is missing or wrong.
    PasswordRequired,
    /// A malformed call: page number out of range or similar.
    Argument(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileNotFound(path) => write!(f, "file not found: {}", path.display()),
            Error::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Error::InvalidPdf { page: None, message } => write!(f, "invalid PDF: {message}"),
            Error::InvalidPdf {
                page: Some(page),
                message,
            } => write!(f, "invalid PDF (page {page}): {message}"),
            Error::PasswordRequired => {
                write!(f, "document is encrypted and requires a valid password")
            }
            Error::Argument(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Map a backend error, attaching the page number being processed.
    pub(crate) fn from_parse(err: ParseError, page: Option<usize>) -> Self {
        match err {
            ParseError::Encrypted | ParseError::WrongPassword => Error::PasswordRequired,
            ParseError::PageOutOfRange { index, count } => Error::Argument(format!(
                "page {} out of range (document has {count} pages)",
                index + 1
            )),
            other => Error::InvalidPdf {
                page,
                message: other.to_string(),
            },
        }
    }
}
