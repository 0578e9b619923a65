/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Parsed message convenience type.
//!
//! [`SwiftMessage`] bundles an [`Envelope`] with registry lookups, so that
//! typed accessors reduce to `field(name)` and `sequence(name)` calls.

use swiftmt_core::envelope::Envelope;
use swiftmt_core::error::{Result, SwiftError};
use swiftmt_core::tag::Tag;
use swiftmt_core::taglist::TagList;
use swiftmt_core::types::MtType;
use swiftmt_fin::{ParserConfig, encode, parse_with};
use swiftmt_schema::{BoundaryRule, SequenceStyle, rule_for, sequence_names, style_for};
use swiftmt_sequence::{Decomposition, decompose};
use tracing::debug;

/// A parsed FIN message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwiftMessage {
    envelope: Envelope,
}

impl SwiftMessage {
    /// Wraps an existing envelope.
    #[must_use]
    pub const fn new(envelope: Envelope) -> Self {
        Self { envelope }
    }

    /// Parses FIN text with the default configuration.
    ///
    /// # Errors
    /// Returns `SwiftError::Parse` if the text cannot be tokenized.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_with(raw, ParserConfig::default())
    }

    /// Parses FIN text with a custom configuration.
    ///
    /// # Errors
    /// Returns `SwiftError::Parse` if the text cannot be tokenized.
    pub fn parse_with(raw: &str, config: ParserConfig) -> Result<Self> {
        let envelope = parse_with(raw, config)?;
        debug!(
            message_type = ?envelope.message_type().map(|mt| mt.to_string()),
            tags = envelope.payload().len(),
            "parsed message"
        );
        Ok(Self { envelope })
    }

    /// Returns the underlying envelope.
    #[inline]
    #[must_use]
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Consumes the message and returns the envelope.
    #[must_use]
    pub fn into_envelope(self) -> Envelope {
        self.envelope
    }

    /// Returns the message type from the application header.
    #[must_use]
    pub fn message_type(&self) -> Option<MtType> {
        self.envelope.message_type()
    }

    /// Returns the payload tags.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &TagList {
        self.envelope.payload()
    }

    /// Returns the first payload tag with the given name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Tag> {
        self.envelope.field(name)
    }

    /// Returns every payload tag with the given name, in order.
    #[must_use]
    pub fn fields(&self, name: &str) -> Vec<&Tag> {
        self.envelope.fields(name)
    }

    /// Returns the boundary style registered for this message type.
    #[must_use]
    pub fn style(&self) -> SequenceStyle {
        self.message_type()
            .map_or(SequenceStyle::Unknown, |mt| style_for(mt.as_str()))
    }

    /// Returns the names of the sequences this message type defines.
    #[must_use]
    pub fn sequence_names(&self) -> Vec<&'static str> {
        self.message_type()
            .map(|mt| sequence_names(mt.as_str()))
            .unwrap_or_default()
    }

    /// Extracts a named sequence from the payload.
    ///
    /// # Errors
    /// - `SwiftError::MissingMessageType` if block 2 is absent or malformed
    /// - `SwiftError::Unsupported` if the message type has no generic rule
    /// - `SwiftError::UnknownSequence` if the message type defines no such sequence
    pub fn sequence(&self, name: &str) -> Result<Decomposition> {
        let mt = self.message_type().ok_or(SwiftError::MissingMessageType)?;
        let rule = rule_for(mt.as_str(), name).ok_or_else(|| SwiftError::UnknownSequence {
            message_type: mt.to_string(),
            sequence: name.to_string(),
        })?;
        self.decompose(&rule).map_err(|_| SwiftError::Unsupported {
            message_type: mt.to_string(),
        })
    }

    /// Applies an arbitrary rule to the payload.
    ///
    /// # Errors
    /// Returns `UnsupportedRule` for custom and unknown rules.
    pub fn decompose(
        &self,
        rule: &BoundaryRule,
    ) -> std::result::Result<Decomposition, swiftmt_sequence::UnsupportedRule> {
        decompose(self.envelope.payload(), rule)
    }

    /// Writes the message back to FIN text.
    ///
    /// # Errors
    /// Returns `SwiftError::Encode` if a value would not read back unchanged.
    pub fn to_fin(&self) -> Result<String> {
        Ok(encode(&self.envelope)?)
    }
}

impl From<Envelope> for SwiftMessage {
    fn from(envelope: Envelope) -> Self {
        Self::new(envelope)
    }
}

impl std::str::FromStr for SwiftMessage {
    type Err = SwiftError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
