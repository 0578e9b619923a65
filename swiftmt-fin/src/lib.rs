/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # SwiftMT FIN
//!
//! FIN envelope tokenizing and serialization for SwiftMT.
//!
//! This crate turns raw FIN text into an [`Envelope`] and back:
//!
//! - **Block scanning**: Brace-depth tracking with `memchr`, so literal braces
//!   inside block 4 values never close a block
//! - **Tag tokenizing**: Block 4 lines become an ordered `TagList`
//! - **Serialization**: Envelopes written back tokenize to the same tags
//! - **Configuration**: Size limit, strict terminator, value trimming

pub mod config;
pub mod decoder;
pub mod encoder;

pub use config::ParserConfig;
pub use decoder::{Decoder, RawBlock, parse, parse_sub_blocks, parse_with, tokenize_payload};
pub use encoder::{Encoder, encode};
pub use swiftmt_core::envelope::Envelope;
