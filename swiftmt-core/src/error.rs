/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for SwiftMT.
//!
//! Tokenizer and serializer failures are fatal and surface as [`ParseError`]
//! and [`EncodeError`]. Structural problems found while regrouping a payload
//! into sequences are reported as [`DecompositionDiagnostic`] values, which
//! never abort a decomposition; callers may upgrade them into a
//! [`SwiftError`] when they want strict behaviour.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`SwiftError`] as the error type.
pub type Result<T> = std::result::Result<T, SwiftError>;

/// Top-level error type for all SwiftMT operations.
#[derive(Debug, Error)]
pub enum SwiftError {
    /// Error while tokenizing FIN text.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error while writing FIN text.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// A decomposition diagnostic the caller chose to treat as an error.
    #[error("decomposition error: {0}")]
    Decomposition(#[from] DecompositionDiagnostic),

    /// The message type has no generic sequence decomposition.
    #[error("no generic decomposition for message type {message_type}")]
    Unsupported {
        /// The message type, as given by the caller.
        message_type: String,
    },

    /// The message type does not define the requested sequence.
    #[error("message type {message_type} defines no sequence {sequence}")]
    UnknownSequence {
        /// The message type.
        message_type: String,
        /// The requested sequence name.
        sequence: String,
    },

    /// The envelope carries no usable application header.
    #[error("message type not available: application header missing or malformed")]
    MissingMessageType,
}

/// Fatal errors raised by the envelope tokenizer.
///
/// A tokenizer either returns a complete envelope or one of these; it never
/// hands back a partially filled envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input is empty or whitespace only.
    #[error("empty message")]
    Empty,

    /// A block was opened but its closing brace was never found.
    #[error("unterminated block {block} opened at offset {offset}")]
    UnterminatedBlock {
        /// The block identifier (e.g. `4`, or `S` for a user block).
        block: String,
        /// Byte offset of the opening brace.
        offset: usize,
    },

    /// Block 4 carries text that does not start with a tag marker.
    #[error("malformed tag at line {line}: {content:?}")]
    MalformedTag {
        /// 1-based line number inside block 4.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// Non-whitespace text found where a block was expected.
    #[error("unexpected content at offset {offset}: {found:?}")]
    UnexpectedContent {
        /// Byte offset of the unexpected character.
        offset: usize,
        /// The unexpected character.
        found: char,
    },

    /// Block 4 is not closed by a `-}` line and the parser runs strict.
    #[error("block 4 is missing the '-}}' terminator")]
    MissingTerminator,

    /// Input exceeds the configured maximum size.
    #[error("message too large: {size} bytes exceeds maximum {max_size}")]
    MessageTooLarge {
        /// Actual input size in bytes.
        size: usize,
        /// Configured maximum in bytes.
        max_size: usize,
    },
}

/// Errors raised while serializing an envelope back to FIN text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A block 4 tag name does not have the `NN[N][A]` shape.
    #[error("invalid tag name for block 4: {name:?}")]
    InvalidTagName {
        /// The rejected tag name.
        name: String,
    },

    /// A value contains a line that the tokenizer would read as structure.
    #[error("value of tag {name} contains a line that reads as a tag marker or terminator")]
    AmbiguousValue {
        /// The tag whose value is ambiguous.
        name: String,
    },

    /// A block identifier is empty, not alphanumeric, or collides with a
    /// numbered block.
    #[error("invalid block name: {name:?}")]
    InvalidBlockName {
        /// The rejected block identifier.
        name: String,
    },

    /// Raw header text contains a brace and would end its block early.
    #[error("content of block {block} contains a brace")]
    InvalidBlockContent {
        /// The block identifier.
        block: String,
    },
}

/// Non-fatal findings reported by the sequence decomposition strategies.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecompositionDiagnostic {
    /// An end tag closed a block opened with a different qualifier.
    #[error("end tag at index {index} closes {expected:?} but carries {found:?}")]
    UnmatchedQualifier {
        /// Qualifier of the innermost open block.
        expected: String,
        /// Qualifier carried by the end tag.
        found: String,
        /// Position of the end tag in the parent list.
        index: usize,
    },

    /// An end tag was found while no block was open.
    #[error("end tag at index {index} with qualifier {found:?} has no open block")]
    UnexpectedEnd {
        /// Qualifier carried by the stray end tag.
        found: String,
        /// Position of the end tag in the parent list.
        index: usize,
    },

    /// A span was opened but the list ended before its end marker.
    #[error("sequence {sequence} starting at index {start} has no end marker")]
    TruncatedSequence {
        /// Label of the truncated sequence.
        sequence: String,
        /// Position of the start marker in the parent list.
        start: usize,
    },

    /// A block was still open when the list ended.
    #[error("block {qualifier:?} opened at index {start} is never closed")]
    UnclosedNesting {
        /// Qualifier of the unclosed block.
        qualifier: String,
        /// Position of the start tag in the parent list.
        start: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::UnterminatedBlock {
            block: "4".to_string(),
            offset: 42,
        };
        assert_eq!(err.to_string(), "unterminated block 4 opened at offset 42");
    }

    #[test]
    fn test_swift_error_from_parse() {
        let err: SwiftError = ParseError::Empty.into();
        assert!(matches!(err, SwiftError::Parse(ParseError::Empty)));
    }

    #[test]
    fn test_diagnostic_upgrade() {
        let diag = DecompositionDiagnostic::UnclosedNesting {
            qualifier: "SETT".to_string(),
            start: 3,
        };
        let err: SwiftError = diag.into();
        assert_eq!(
            err.to_string(),
            "decomposition error: block \"SETT\" opened at index 3 is never closed"
        );
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::InvalidBlockName {
            name: "4".to_string(),
        };
        assert_eq!(err.to_string(), "invalid block name: \"4\"");
        let err: SwiftError = EncodeError::InvalidBlockContent {
            block: "1".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "encode error: content of block 1 contains a brace"
        );
    }

    #[test]
    fn test_terminator_display() {
        assert_eq!(
            ParseError::MissingTerminator.to_string(),
            "block 4 is missing the '-}' terminator"
        );
    }
}
