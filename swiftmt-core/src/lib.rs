/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # SwiftMT Core
//!
//! Core types and error definitions for SWIFT MT (FIN) message processing.
//!
//! This crate provides the building blocks shared by every SwiftMT crate:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Tags**: [`Tag`], the `(name, value)` unit of a block
//! - **Tag lists**: [`TagList`], ordered and duplicate tolerant
//! - **Envelope**: [`Envelope`] with typed header blocks
//! - **Core types**: [`MtType`], [`MtVariant`], [`LogicalTerminal`]
//!
//! All values are owned; parsing and decomposition hand back fresh data
//! and never share mutable state.

pub mod envelope;
pub mod error;
pub mod tag;
pub mod taglist;
pub mod types;

pub use envelope::{ApplicationHeader, BasicHeader, Envelope, PayloadForm, UserBlock};
pub use error::{DecompositionDiagnostic, EncodeError, ParseError, Result, SwiftError};
pub use tag::{Tag, is_field_name, split_name};
pub use taglist::{TagList, tags_by_name};
pub use types::{Direction, LogicalTerminal, MtType, MtVariant, Priority};
