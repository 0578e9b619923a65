/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Tokenizer configuration.
//!
//! This module provides configuration options for the FIN envelope decoder.

/// Default maximum accepted input size in bytes.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Configuration for the FIN envelope decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum input size in bytes.
    pub max_message_size: usize,
    /// Whether block 4 must be closed by a `-}` line.
    pub require_terminator: bool,
    /// Whether trailing whitespace is removed from block 4 values.
    pub trim_values: bool,
}

impl ParserConfig {
    /// Creates a lenient configuration with default limits.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            require_terminator: false,
            trim_values: false,
        }
    }

    /// Creates a configuration that rejects a block 4 without terminator.
    #[must_use]
    pub const fn strict() -> Self {
        Self::new().with_require_terminator(true)
    }

    /// Sets the maximum input size.
    #[must_use]
    pub const fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    /// Sets whether block 4 must end with a `-}` line.
    #[must_use]
    pub const fn with_require_terminator(mut self, require: bool) -> Self {
        self.require_terminator = require;
        self
    }

    /// Sets whether trailing whitespace is trimmed from block 4 values.
    #[must_use]
    pub const fn with_trim_values(mut self, trim: bool) -> Self {
        self.trim_values = trim;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}
