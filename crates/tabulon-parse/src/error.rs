//! Error types for the parsing backend.
//!
//! Uses [`thiserror`] for ergonomic error derivation. [`ParseError`] covers
//! byte-level failures, encryption, and page access; the high-level crate
//! maps these onto its own error kinds.

use thiserror::Error;

/// Errors raised while opening or interpreting a PDF document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The bytes do not form a well-formed PDF document.
    #[error("malformed PDF: {0}")]
    Malformed(String),

    /// An I/O failure while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is encrypted and no password was supplied.
    #[error("document is encrypted and requires a password")]
    Encrypted,

    /// The supplied password does not decrypt the document.
    #[error("the supplied password is incorrect")]
    WrongPassword,

    /// A page index beyond the document's page count.
    #[error("page index {index} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// The requested 0-based index.
        index: usize,
        /// The document's page count.
        count: usize,
    },
}

impl ParseError {
    pub(crate) fn malformed(e: impl std::fmt::Display) -> Self {
        ParseError::Malformed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ParseError::Encrypted.to_string(),
            "document is encrypted and requires a password"
        );
        assert_eq!(
            ParseError::PageOutOfRange { index: 7, count: 3 }.to_string(),
            "page index 7 out of range (document has 3 pages)"
        );
        assert!(ParseError::Malformed("bad xref".into())
            .to_string()
            .contains("bad xref"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ParseError = io.into();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
