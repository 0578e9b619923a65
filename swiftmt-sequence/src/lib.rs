/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # SwiftMT Sequence
//!
//! Sequence decomposition engine for SWIFT MT payloads.
//!
//! This crate provides:
//! - **Marker letter splitting**: Treasury sequences opened by `15A`, `15B`, ...
//! - **Qualified blocks**: Nested `16R`/`16S` sequences with best-effort recovery
//! - **Fixed spans**: Repeating `start ... end [tail]` sequences
//! - **Dispatch**: [`decompose`] applies any boundary rule
//!
//! Decomposition is lenient: structurally imperfect payloads still yield
//! their best-effort partition, with [`DecompositionDiagnostic`] entries
//! describing what was off.
//!
//! [`DecompositionDiagnostic`]: swiftmt_core::DecompositionDiagnostic

pub mod decompose;
pub mod marker;
pub mod paired;
pub mod sequence;
pub mod span;

pub use decompose::{UnsupportedRule, decompose};
pub use marker::decompose_by_marker;
pub use paired::decompose_paired;
pub use sequence::{Decomposition, Sequence, SequenceLabel};
pub use span::decompose_fixed_span;
