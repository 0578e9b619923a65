/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # SwiftMT
//!
//! SWIFT MT (FIN) message tokenizing and sequence decomposition for Rust.
//!
//! SwiftMT splits a FIN message into its envelope blocks, tokenizes the
//! payload into an ordered tag list, and regroups that list into the named
//! sequences each message type defines.
//!
//! ## Features
//!
//! - **Lossless tokenizing**: Tag order, repeated tags and multi-line values are kept
//! - **Round trip**: Envelopes serialize back to FIN text that reads back identically
//! - **Lenient decomposition**: Malformed structure yields diagnostics, not failures
//! - **Data-driven registry**: Sequence rules for every supported MT live in one table
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use swiftmt::prelude::*;
//!
//! let msg = SwiftMessage::parse(raw)?;
//! let reference = msg.field("20").map(Tag::value);
//! for party in &msg.sequence("E1")? {
//!     println!("{:?}", party.field("95P"));
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Tags, tag lists, envelope and error definitions
//! - [`fin`]: FIN text tokenizer and serializer
//! - [`schema`]: Boundary rules and the sequence registry
//! - [`sequence`]: Sequence decomposition engine

mod message;

pub use message::SwiftMessage;

pub mod core {
    //! Tags, tag lists, envelope and error definitions.
    pub use swiftmt_core::*;
}

pub mod fin {
    //! FIN text tokenizer and serializer.
    pub use swiftmt_fin::*;
}

pub mod schema {
    //! Boundary rules and the sequence registry.
    pub use swiftmt_schema::*;
}

pub mod sequence {
    //! Sequence decomposition engine.
    pub use swiftmt_sequence::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use swiftmt_core::{
        ApplicationHeader, BasicHeader, DecompositionDiagnostic, EncodeError, Envelope, MtType,
        MtVariant, ParseError, Result, SwiftError, Tag, TagList, tags_by_name,
    };

    // FIN text
    pub use swiftmt_fin::{Decoder, Encoder, ParserConfig, encode, parse, parse_with};

    // Schema
    pub use swiftmt_schema::{BoundaryRule, FixedSpan, SequenceStyle, rule_for, style_for};

    // Sequences
    pub use swiftmt_sequence::{
        Decomposition, Sequence, SequenceLabel, UnsupportedRule, decompose, decompose_by_marker,
        decompose_fixed_span, decompose_paired,
    };

    pub use crate::SwiftMessage;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut payload = TagList::new();
        payload.append(Tag::new("20", "REF"));
        let _rule = BoundaryRule::split_by_marker("15");
        let _config = ParserConfig::default();
        assert_eq!(tags_by_name(&payload, "20").len(), 1);
    }

    #[test]
    fn test_registry_through_prelude() {
        assert_eq!(style_for("MT540"), SequenceStyle::PairedQualifierBlocks);
        assert_eq!(rule_for("103", "A"), Some(BoundaryRule::Custom));
    }
}
