/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIN message encoder.
//!
//! This module writes an [`Envelope`] back to FIN text. Output produced here
//! tokenizes back to the same tags: values that would not survive the trip
//! are rejected with [`EncodeError::AmbiguousValue`], block names and header
//! text that would change the block layout with [`EncodeError::InvalidBlockName`]
//! and [`EncodeError::InvalidBlockContent`].

use crate::decoder::tag_marker;
use bytes::{BufMut, Bytes, BytesMut};
use swiftmt_core::envelope::{Envelope, PayloadForm};
use swiftmt_core::error::EncodeError;
use swiftmt_core::tag::{Tag, is_field_name};
use swiftmt_core::taglist::TagList;

/// Line break used between block 4 fields.
pub const CRLF: &[u8] = b"\r\n";

/// FIN message encoder.
///
/// Blocks are appended in call order; [`encode`] drives it in the canonical
/// `1, 2, 3, 4, 5, user blocks` order.
#[derive(Debug)]
pub struct Encoder {
    /// Output buffer.
    buf: BytesMut,
}

impl Encoder {
    /// Creates a new encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// Creates a new encoder with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Initial buffer capacity in bytes
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends a block with opaque content, as used for blocks 1 and 2.
    ///
    /// # Arguments
    /// * `name` - The block identifier
    /// * `content` - The raw block content
    ///
    /// # Errors
    /// Returns `EncodeError` if the name is not a block identifier or the
    /// content contains a brace.
    pub fn put_raw_block(&mut self, name: &str, content: &str) -> Result<(), EncodeError> {
        check_block_name(name)?;
        if content.contains(['{', '}']) {
            return Err(EncodeError::InvalidBlockContent {
                block: name.to_string(),
            });
        }
        self.open_block(name);
        self.buf.put_slice(content.as_bytes());
        self.buf.put_u8(b'}');
        Ok(())
    }

    /// Appends a block made of `{name:value}` sub-blocks.
    ///
    /// # Errors
    /// Returns `EncodeError` if the name is not a block identifier or a
    /// sub-block would not read back unchanged.
    pub fn put_sub_block(&mut self, name: &str, tags: &TagList) -> Result<(), EncodeError> {
        check_block_name(name)?;
        for tag in tags {
            check_sub_tag(tag)?;
        }
        self.open_block(name);
        self.put_braced_tags(tags);
        self.buf.put_u8(b'}');
        Ok(())
    }

    /// Appends block 4 in the given layout.
    ///
    /// # Errors
    /// Returns `EncodeError` if a tag name has the wrong shape or a value
    /// would be tokenized differently.
    pub fn put_payload(&mut self, tags: &TagList, form: PayloadForm) -> Result<(), EncodeError> {
        if form == PayloadForm::Braces {
            return self.put_sub_block("4", tags);
        }
        for tag in tags {
            check_field(tag)?;
        }
        self.open_block("4");
        self.buf.put_slice(CRLF);
        for tag in tags {
            self.buf.put_u8(b':');
            self.buf.put_slice(tag.name().as_bytes());
            self.buf.put_u8(b':');
            self.buf.put_slice(tag.value().as_bytes());
            self.buf.put_slice(CRLF);
        }
        self.buf.put_slice(b"-}");
        Ok(())
    }

    /// Finalizes the message and returns the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }

    /// Finalizes the message and returns it as text.
    #[must_use]
    pub fn finish_string(self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }

    /// Returns the number of bytes written so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Clears the encoder for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    fn open_block(&mut self, name: &str) {
        self.buf.put_u8(b'{');
        self.buf.put_slice(name.as_bytes());
        self.buf.put_u8(b':');
    }

    fn put_braced_tags(&mut self, tags: &TagList) {
        for tag in tags {
            self.buf.put_u8(b'{');
            self.buf.put_slice(tag.name().as_bytes());
            self.buf.put_u8(b':');
            self.buf.put_slice(tag.value().as_bytes());
            self.buf.put_u8(b'}');
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes an envelope as FIN text.
///
/// # Errors
/// Returns `EncodeError` if a block would not tokenize back unchanged.
pub fn encode(envelope: &Envelope) -> Result<String, EncodeError> {
    let mut encoder = Encoder::new();
    if let Some(header) = envelope.basic_header() {
        encoder.put_raw_block("1", header.raw())?;
    }
    if let Some(header) = envelope.application_header() {
        encoder.put_raw_block("2", header.raw())?;
    }
    if let Some(tags) = envelope.user_header() {
        encoder.put_sub_block("3", tags)?;
    }
    if envelope.has_payload() {
        encoder.put_payload(envelope.payload(), envelope.payload_form())?;
    }
    if let Some(tags) = envelope.trailer() {
        encoder.put_sub_block("5", tags)?;
    }
    for block in envelope.user_blocks() {
        if matches!(block.name.as_str(), "1" | "2" | "3" | "4" | "5") {
            return Err(EncodeError::InvalidBlockName {
                name: block.name.clone(),
            });
        }
        encoder.put_sub_block(&block.name, &block.tags)?;
    }
    Ok(encoder.finish_string())
}

/// Block identifiers are non-empty and ASCII alphanumeric, as the decoder reads them.
fn check_block_name(name: &str) -> Result<(), EncodeError> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(EncodeError::InvalidBlockName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn check_field(tag: &Tag) -> Result<(), EncodeError> {
    if !is_field_name(tag.name()) {
        return Err(EncodeError::InvalidTagName {
            name: tag.name().to_string(),
        });
    }
    let ambiguous = tag
        .value()
        .split('\n')
        .skip(1)
        .any(|line| tag_marker(line).is_some() || line.starts_with("-}"));
    if ambiguous {
        return Err(EncodeError::AmbiguousValue {
            name: tag.name().to_string(),
        });
    }
    Ok(())
}

fn check_sub_tag(tag: &Tag) -> Result<(), EncodeError> {
    if tag.name().is_empty() || tag.name().contains([':', '{', '}']) {
        return Err(EncodeError::InvalidTagName {
            name: tag.name().to_string(),
        });
    }
    let mut depth = 0i32;
    for b in tag.value().bytes() {
        match b {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            break;
        }
    }
    if depth != 0 {
        return Err(EncodeError::AmbiguousValue {
            name: tag.name().to_string(),
        });
    }
    Ok(())
}
