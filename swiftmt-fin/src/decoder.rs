/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIN envelope decoder.
//!
//! This module splits raw FIN text into its numbered blocks and tokenizes
//! block 4 into an ordered [`TagList`]. Block boundaries are found by brace
//! depth, except for the line-form payload which ends at its `-}` line:
//! field values there may legitimately carry unbalanced `{` and `}`.

use crate::config::ParserConfig;
use memchr::{memchr, memchr_iter, memchr2, memchr2_iter, memmem};
use swiftmt_core::envelope::{ApplicationHeader, BasicHeader, Envelope, PayloadForm, UserBlock};
use swiftmt_core::error::ParseError;
use swiftmt_core::tag::Tag;
use swiftmt_core::taglist::TagList;
use tracing::{debug, trace, warn};

/// Opening brace of a block or sub-block.
pub const BLOCK_OPEN: u8 = b'{';

/// Closing brace of a block or sub-block.
pub const BLOCK_CLOSE: u8 = b'}';

/// Separator between a block identifier and its content.
pub const NAME_SEPARATOR: u8 = b':';

/// Line that closes a line-form block 4, preceded by its line break.
const PAYLOAD_TERMINATOR: &[u8] = b"\n-}";

/// A block as found in the input, before its content is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// Block identifier (`1`-`5`, or a user block name).
    pub name: &'a str,
    /// Text between the identifier separator and the block end.
    pub content: &'a str,
    /// Byte offset of the opening brace.
    pub offset: usize,
    /// Byte offset of the first content byte.
    pub content_offset: usize,
    /// For block 4, whether the `-}` closing line was present.
    pub terminated: bool,
}

/// FIN envelope decoder.
///
/// The decoder walks the input once, left to right. Decoding is atomic:
/// either a complete [`Envelope`] comes back or a [`ParseError`] does.
#[derive(Debug)]
pub struct Decoder<'a> {
    /// Input text.
    input: &'a str,
    /// Current position in the input.
    offset: usize,
    /// Tokenizer options.
    config: ParserConfig,
}

impl<'a> Decoder<'a> {
    /// Creates a new decoder for the given input.
    ///
    /// # Arguments
    /// * `input` - The raw FIN message text
    #[inline]
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            config: ParserConfig::new(),
        }
    }

    /// Sets the tokenizer options.
    ///
    /// # Arguments
    /// * `config` - The options to apply
    #[inline]
    #[must_use]
    pub const fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Decodes the complete envelope.
    ///
    /// # Errors
    /// Returns `ParseError` if the input is empty, too large, has an
    /// unterminated block, or carries block 4 text outside any tag.
    pub fn decode(&mut self) -> Result<Envelope, ParseError> {
        if self.input.trim().is_empty() {
            return Err(ParseError::Empty);
        }
        if self.input.len() > self.config.max_message_size {
            return Err(ParseError::MessageTooLarge {
                size: self.input.len(),
                max_size: self.config.max_message_size,
            });
        }

        let mut basic_header = None;
        let mut application_header = None;
        let mut user_header = None;
        let mut payload = None;
        let mut trailer = None;
        let mut user_blocks = Vec::new();
        let mut block_count = 0usize;

        while let Some(block) = self.next_block()? {
            block_count += 1;
            trace!(block = block.name, offset = block.offset, "found block");
            match block.name {
                "1" => set_once(&mut basic_header, BasicHeader::from_raw(block.content), "1"),
                "2" => set_once(
                    &mut application_header,
                    ApplicationHeader::from_raw(block.content),
                    "2",
                ),
                "3" => set_once(
                    &mut user_header,
                    parse_sub_blocks(block.content, block.content_offset)?,
                    "3",
                ),
                "4" => {
                    let decoded = self.decode_payload(&block)?;
                    set_once(&mut payload, decoded, "4");
                }
                "5" => set_once(
                    &mut trailer,
                    parse_sub_blocks(block.content, block.content_offset)?,
                    "5",
                ),
                name => user_blocks.push(UserBlock {
                    name: name.to_string(),
                    tags: parse_sub_blocks(block.content, block.content_offset)?,
                }),
            }
        }

        let mut envelope = Envelope::new();
        if let Some(header) = basic_header {
            envelope = envelope.with_basic_header(header);
        }
        if let Some(header) = application_header {
            envelope = envelope.with_application_header(header);
        }
        if let Some(tags) = user_header {
            envelope = envelope.with_user_header(tags);
        }
        if let Some((tags, form)) = payload {
            envelope = envelope.with_payload_form(tags, form);
        }
        if let Some(tags) = trailer {
            envelope = envelope.with_trailer(tags);
        }
        for block in user_blocks {
            envelope = envelope.with_user_block(block);
        }

        debug!(
            blocks = block_count,
            tags = envelope.payload().len(),
            "decoded FIN envelope"
        );
        Ok(envelope)
    }

    /// Returns the next top-level block, or `None` once the input is exhausted.
    ///
    /// # Errors
    /// Returns `ParseError` when a block is not closed or text outside any
    /// block is found.
    pub fn next_block(&mut self) -> Result<Option<RawBlock<'a>>, ParseError> {
        let bytes = self.input.as_bytes();
        while self.offset < bytes.len() && bytes[self.offset].is_ascii_whitespace() {
            self.offset += 1;
        }
        if self.offset >= bytes.len() {
            return Ok(None);
        }

        let open = self.offset;
        if bytes[open] != BLOCK_OPEN {
            return Err(unexpected(self.input, open));
        }

        let name_start = open + 1;
        let separator = match memchr2(NAME_SEPARATOR, BLOCK_CLOSE, &bytes[name_start..]) {
            Some(pos) if bytes[name_start + pos] == NAME_SEPARATOR => name_start + pos,
            Some(pos) => return Err(unexpected(self.input, name_start + pos)),
            None => {
                return Err(ParseError::UnterminatedBlock {
                    block: self.input[name_start..].chars().take(1).collect(),
                    offset: open,
                });
            }
        };
        let name = &self.input[name_start..separator];
        if let Some(bad) = name.bytes().position(|b| !b.is_ascii_alphanumeric()) {
            return Err(unexpected(self.input, name_start + bad));
        }
        if name.is_empty() {
            return Err(unexpected(self.input, separator));
        }

        let content_offset = separator + 1;
        let (content_end, next, terminated) = match name {
            "1" | "2" => {
                let close = flat_close(bytes, content_offset).ok_or_else(|| unterminated(name, open))?;
                (close, close + 1, true)
            }
            "4" if !is_brace_payload(&self.input[content_offset..]) => {
                self.payload_end(open, content_offset)?
            }
            _ => {
                let close = matching_close(bytes, open).ok_or_else(|| unterminated(name, open))?;
                (close, close + 1, true)
            }
        };

        self.offset = next;
        Ok(Some(RawBlock {
            name,
            content: &self.input[content_offset..content_end],
            offset: open,
            content_offset,
            terminated,
        }))
    }

    /// Returns the current offset in the input.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns true if the input has been fully consumed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input[self.offset..].trim().is_empty()
    }

    /// Resets the decoder to the beginning of the input.
    #[inline]
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Locates the end of a line-form block 4.
    ///
    /// Returns the content end, the offset after the block, and whether the
    /// `-}` line was present.
    fn payload_end(
        &self,
        open: usize,
        content_offset: usize,
    ) -> Result<(usize, usize, bool), ParseError> {
        let bytes = self.input.as_bytes();
        let content = &bytes[content_offset..];
        if content.starts_with(b"-}") {
            return Ok((content_offset, content_offset + 2, true));
        }
        let close = matching_close(bytes, open);
        if let Some(pos) = memmem::find(content, PAYLOAD_TERMINATOR) {
            let dash = content_offset + pos + 1;
            // A `-}` line beyond a closing brace that is followed by another
            // block belongs to that later block.
            let past_block =
                close.is_some_and(|close| close < dash && starts_block(bytes, close + 1));
            if !past_block {
                return Ok((dash, dash + 2, true));
            }
        }

        // No `-}` line: fall back to brace depth and accept a dangling `-` line.
        let close = close.ok_or_else(|| unterminated("4", open))?;
        let body = self.input[content_offset..close].trim_end();
        if body == "-" || body.ends_with("\n-") {
            let dash = content_offset + body.len() - 1;
            return Ok((dash, close + 1, true));
        }
        Ok((close, close + 1, false))
    }

    fn decode_payload(&self, block: &RawBlock<'a>) -> Result<(TagList, PayloadForm), ParseError> {
        if is_brace_payload(&self.input[block.content_offset..]) {
            let tags = parse_sub_blocks(block.content, block.content_offset)?;
            return Ok((tags, PayloadForm::Braces));
        }
        if !block.terminated {
            if self.config.require_terminator {
                return Err(ParseError::MissingTerminator);
            }
            warn!(offset = block.offset, "block 4 has no '-}}' terminator, reading up to the closing brace");
        }
        Ok((tokenize_payload(block.content, &self.config)?, PayloadForm::Lines))
    }
}

/// Parses a FIN message with the default configuration.
///
/// # Errors
/// Returns `ParseError` if the message cannot be tokenized.
pub fn parse(raw: &str) -> Result<Envelope, ParseError> {
    Decoder::new(raw).decode()
}

/// Parses a FIN message with the given configuration.
///
/// # Errors
/// Returns `ParseError` if the message cannot be tokenized.
pub fn parse_with(raw: &str, config: ParserConfig) -> Result<Envelope, ParseError> {
    Decoder::new(raw).with_config(config).decode()
}

/// Tokenizes line-form block 4 content into tags.
///
/// Every line starting with `:NN[N][A]:` opens a new tag whose value runs,
/// embedded line breaks included, up to the line break before the next
/// tag line or the end of `content`.
///
/// # Errors
/// Returns `ParseError::MalformedTag` for non-blank text before the first tag.
pub fn tokenize_payload(content: &str, config: &ParserConfig) -> Result<TagList, ParseError> {
    let bytes = content.as_bytes();
    let mut tags = TagList::new();
    let mut current: Option<(&str, usize)> = None;

    let line_starts = std::iter::once(0).chain(memchr_iter(b'\n', bytes).map(|p| p + 1));
    for (index, line_start) in line_starts.enumerate() {
        if line_start > bytes.len() {
            break;
        }
        let line_end = memchr(b'\n', &bytes[line_start..]).map_or(bytes.len(), |p| line_start + p);
        let line = &content[line_start..line_end];

        if let Some(marker) = tag_marker(line) {
            if let Some((name, value_start)) = current.take() {
                let value_end = break_start(bytes, line_start).max(value_start);
                tags.append(make_tag(name, &content[value_start..value_end], config));
            }
            current = Some((&line[1..marker - 1], line_start + marker));
        } else if current.is_none() && !line.trim().is_empty() {
            return Err(ParseError::MalformedTag {
                line: index + 1,
                content: line.trim_end().to_string(),
            });
        }
    }

    if let Some((name, value_start)) = current {
        let value_end = trailing_break_start(content).max(value_start);
        tags.append(make_tag(name, &content[value_start..value_end], config));
    }

    trace!(tags = tags.len(), "tokenized block 4");
    Ok(tags)
}

/// Parses `{name:value}` sub-blocks, as found in blocks 3 and 5.
///
/// A sub-block without a separator yields a tag with an empty value.
///
/// # Errors
/// Returns `ParseError` for text outside a sub-block or an unclosed sub-block.
pub fn parse_sub_blocks(content: &str, base_offset: usize) -> Result<TagList, ParseError> {
    let bytes = content.as_bytes();
    let mut tags = TagList::new();
    let mut pos = 0;

    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }
        if bytes[pos] != BLOCK_OPEN {
            return Err(unexpected_at(content, pos, base_offset));
        }
        let close = matching_close(bytes, pos).ok_or_else(|| ParseError::UnterminatedBlock {
            block: content[pos + 1..].split(':').next().unwrap_or_default().to_string(),
            offset: base_offset + pos,
        })?;
        let inner = &content[pos + 1..close];
        let (name, value) = inner.split_once(':').unwrap_or((inner, ""));
        tags.append(Tag::new(name, value));
        pos = close + 1;
    }

    Ok(tags)
}

/// Returns the length of the `:NN[N][A]:` marker opening `line`, if any.
pub(crate) fn tag_marker(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    if bytes.first() != Some(&NAME_SEPARATOR) {
        return None;
    }
    let digits = bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count();
    if !(2..=3).contains(&digits) {
        return None;
    }
    let mut end = 1 + digits;
    if bytes.get(end).is_some_and(|b| b.is_ascii_uppercase()) {
        end += 1;
    }
    (bytes.get(end) == Some(&NAME_SEPARATOR)).then_some(end + 1)
}

fn make_tag(name: &str, value: &str, config: &ParserConfig) -> Tag {
    if config.trim_values {
        Tag::new(name, value.trim_end())
    } else {
        Tag::new(name, value)
    }
}

/// Start of the line break that ends right before `line_start`.
fn break_start(bytes: &[u8], line_start: usize) -> usize {
    if line_start >= 2 && bytes[line_start - 2] == b'\r' {
        line_start - 2
    } else {
        line_start.saturating_sub(1)
    }
}

/// Start of the line break closing `content`, or its length if there is none.
fn trailing_break_start(content: &str) -> usize {
    content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .map_or(content.len(), str::len)
}

/// First `}` after `from`, provided no `{` comes before it.
fn flat_close(bytes: &[u8], from: usize) -> Option<usize> {
    let pos = from + memchr2(BLOCK_OPEN, BLOCK_CLOSE, &bytes[from..])?;
    (bytes[pos] == BLOCK_CLOSE).then_some(pos)
}

/// Returns true if block 4 text, starting right after its separator, uses
/// the `{name:value}` layout. `{4:}` is an empty block of that layout.
fn is_brace_payload(rest: &str) -> bool {
    matches!(rest.trim_start().as_bytes().first(), Some(b'{' | b'}'))
}

/// Returns true if a `{name:` block opening follows `from`, after whitespace.
fn starts_block(bytes: &[u8], from: usize) -> bool {
    let rest = &bytes[from.min(bytes.len())..];
    let Some(open) = rest.iter().position(|b| !b.is_ascii_whitespace()) else {
        return false;
    };
    if rest[open] != BLOCK_OPEN {
        return false;
    }
    let name = rest[open + 1..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    name > 0 && rest.get(open + 1 + name) == Some(&NAME_SEPARATOR)
}

/// Brace matching the `{` at `open`, tracking nesting depth.
fn matching_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for pos in memchr2_iter(BLOCK_OPEN, BLOCK_CLOSE, &bytes[open..]) {
        let at = open + pos;
        if bytes[at] == BLOCK_OPEN {
            depth += 1;
        } else {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(at);
            }
        }
    }
    None
}

fn set_once<T>(slot: &mut Option<T>, value: T, block: &str) {
    if slot.is_some() {
        warn!(block, "duplicate block ignored");
    } else {
        *slot = Some(value);
    }
}

fn unterminated(name: &str, offset: usize) -> ParseError {
    ParseError::UnterminatedBlock {
        block: name.to_string(),
        offset,
    }
}

fn unexpected(input: &str, offset: usize) -> ParseError {
    unexpected_at(input, offset, 0)
}

fn unexpected_at(text: &str, offset: usize, base_offset: usize) -> ParseError {
    ParseError::UnexpectedContent {
        offset: base_offset + offset,
        found: text[offset..].chars().next().unwrap_or_default(),
    }
}
