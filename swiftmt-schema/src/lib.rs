/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # SwiftMT Schema
//!
//! Sequence boundary rules for SWIFT MT messages.
//!
//! This crate provides:
//! - **Boundary rules**: Declarative description of how a payload splits into sequences
//! - **Sequence registry**: Built-in table of boundary styles for every supported MT

pub mod registry;
pub mod schema;

pub use registry::{registered_types, rule_for, schema, sequence_names, style_for};
pub use schema::{
    BLOCK_END, BLOCK_START, BoundaryRule, FixedSpan, MARKER_FIELD, MtSchema, SequenceBoundary,
    SequenceDef, SequenceStyle,
};
