/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIN envelope types.
//!
//! This module provides:
//! - [`BasicHeader`]: Block 1, positional session metadata
//! - [`ApplicationHeader`]: Block 2, message type and routing
//! - [`UserBlock`]: Blocks with identifiers outside `1`-`5`
//! - [`Envelope`]: The parsed message, blocks 1-5 plus user blocks
//!
//! Header blocks keep their raw text and decode positional fields on
//! demand, so a short or non-conformant header never fails a parse.

use crate::tag::Tag;
use crate::taglist::TagList;
use crate::types::{Direction, LogicalTerminal, MtType, MtVariant, Priority};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

static EMPTY_PAYLOAD: TagList = TagList::new();

/// Block 3 field carrying the validation flag.
pub const FIELD_VALIDATION_FLAG: &str = "119";
/// Block 3 field carrying the message user reference.
pub const FIELD_MUR: &str = "108";
/// Block 3 field carrying the unique end-to-end transaction reference.
pub const FIELD_UETR: &str = "121";

fn slice(raw: &str, start: usize, len: usize) -> Option<&str> {
    raw.get(start..start + len)
}

fn char_at(raw: &str, index: usize) -> Option<char> {
    raw.as_bytes().get(index).map(|b| *b as char)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%y%m%d").ok()
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H%M").ok()
}

/// Block 1: the basic header.
///
/// Layout: application id (1), service id (2), logical terminal (12),
/// session number (4), sequence number (6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasicHeader {
    raw: String,
}

impl BasicHeader {
    /// Wraps the raw block 1 content.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Builds a FIN (`F01`) basic header.
    ///
    /// # Arguments
    /// * `lt` - The sender logical terminal
    /// * `session` - Session number, zero padded to 4 digits
    /// * `sequence` - Sequence number, zero padded to 6 digits
    #[must_use]
    pub fn fin(lt: LogicalTerminal, session: u16, sequence: u32) -> Self {
        Self {
            raw: format!("F01{lt}{session:04}{sequence:06}"),
        }
    }

    /// Returns the raw block content.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the application id (`F`, `A` or `L`).
    #[must_use]
    pub fn application_id(&self) -> Option<char> {
        char_at(&self.raw, 0)
    }

    /// Returns the service id (`01` for FIN, `21` for ACK/NAK).
    #[must_use]
    pub fn service_id(&self) -> Option<&str> {
        slice(&self.raw, 1, 2)
    }

    /// Returns the logical terminal address.
    #[must_use]
    pub fn logical_terminal(&self) -> Option<LogicalTerminal> {
        slice(&self.raw, 3, 12).and_then(LogicalTerminal::new)
    }

    /// Returns the session number.
    #[must_use]
    pub fn session_number(&self) -> Option<u16> {
        slice(&self.raw, 15, 4).and_then(|s| s.parse().ok())
    }

    /// Returns the sequence number.
    #[must_use]
    pub fn sequence_number(&self) -> Option<u32> {
        slice(&self.raw, 19, 6).and_then(|s| s.parse().ok())
    }
}

/// Block 2: the application header, input or output flavour.
///
/// Input layout: `I` + MT (3) + receiver (12) + priority (1) +
/// delivery monitoring (1) + obsolescence period (3), the last three
/// optional. Output layout: `O` + MT (3) + input time (4) + MIR (28) +
/// output date (6) + output time (4) + priority (1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationHeader {
    raw: String,
}

impl ApplicationHeader {
    /// Wraps the raw block 2 content.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Builds an input application header.
    #[must_use]
    pub fn input(mt: MtType, receiver: LogicalTerminal, priority: Priority) -> Self {
        Self {
            raw: format!("I{mt}{receiver}{}", priority.as_char()),
        }
    }

    /// Returns the raw block content.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the header direction.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        char_at(&self.raw, 0).and_then(Direction::from_char)
    }

    /// Returns the message type.
    #[must_use]
    pub fn message_type(&self) -> Option<MtType> {
        slice(&self.raw, 1, 3).and_then(MtType::new)
    }

    /// Returns the receiver address of an input header.
    #[must_use]
    pub fn receiver(&self) -> Option<LogicalTerminal> {
        match self.direction()? {
            Direction::Input => slice(&self.raw, 4, 12).and_then(LogicalTerminal::new),
            Direction::Output => None,
        }
    }

    /// Returns the sender address of an output header, taken from the MIR.
    #[must_use]
    pub fn sender(&self) -> Option<LogicalTerminal> {
        match self.direction()? {
            Direction::Output => slice(&self.raw, 14, 12).and_then(LogicalTerminal::new),
            Direction::Input => None,
        }
    }

    /// Returns the message priority.
    #[must_use]
    pub fn priority(&self) -> Option<Priority> {
        let index = match self.direction()? {
            Direction::Input => 16,
            Direction::Output => 46,
        };
        char_at(&self.raw, index).and_then(Priority::from_char)
    }

    /// Returns the delivery monitoring code of an input header.
    #[must_use]
    pub fn delivery_monitoring(&self) -> Option<char> {
        match self.direction()? {
            Direction::Input => char_at(&self.raw, 17),
            Direction::Output => None,
        }
    }

    /// Returns the obsolescence period of an input header, in 5 minute units.
    #[must_use]
    pub fn obsolescence_period(&self) -> Option<u16> {
        match self.direction()? {
            Direction::Input => slice(&self.raw, 18, 3).and_then(|s| s.parse().ok()),
            Direction::Output => None,
        }
    }

    /// Returns the sender's input time of an output header.
    #[must_use]
    pub fn input_time(&self) -> Option<NaiveTime> {
        self.output_slice(4, 4).and_then(parse_time)
    }

    /// Returns the message input reference of an output header.
    #[must_use]
    pub fn mir(&self) -> Option<&str> {
        self.output_slice(8, 28)
    }

    /// Returns the input date carried in the MIR.
    #[must_use]
    pub fn input_date(&self) -> Option<NaiveDate> {
        self.output_slice(8, 6).and_then(parse_date)
    }

    /// Returns the output date of an output header.
    #[must_use]
    pub fn output_date(&self) -> Option<NaiveDate> {
        self.output_slice(36, 6).and_then(parse_date)
    }

    /// Returns the output time of an output header.
    #[must_use]
    pub fn output_time(&self) -> Option<NaiveTime> {
        self.output_slice(42, 4).and_then(parse_time)
    }

    fn output_slice(&self, start: usize, len: usize) -> Option<&str> {
        match self.direction()? {
            Direction::Output => slice(&self.raw, start, len),
            Direction::Input => None,
        }
    }
}

/// A block whose identifier is not `1`-`5`, such as `{S:{SAC:}{COP:P}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBlock {
    /// Block identifier.
    pub name: String,
    /// Sub-fields of the block.
    pub tags: TagList,
}

/// Layout of block 4 content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadForm {
    /// `:tag:value` lines closed by `-}`.
    #[default]
    Lines,
    /// `{tag:value}` sub-blocks, as used by system and service messages.
    Braces,
}

/// A tokenized FIN message.
///
/// Blocks 1, 2, 3 and 5 are optional metadata; block 4 is the payload and
/// reads as an empty list when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    basic_header: Option<BasicHeader>,
    application_header: Option<ApplicationHeader>,
    user_header: Option<TagList>,
    payload: Option<TagList>,
    payload_form: PayloadForm,
    trailer: Option<TagList>,
    user_blocks: Vec<UserBlock>,
}

impl Envelope {
    /// Creates an envelope with no blocks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets block 1.
    #[must_use]
    pub fn with_basic_header(mut self, header: BasicHeader) -> Self {
        self.basic_header = Some(header);
        self
    }

    /// Sets block 2.
    #[must_use]
    pub fn with_application_header(mut self, header: ApplicationHeader) -> Self {
        self.application_header = Some(header);
        self
    }

    /// Sets block 3.
    #[must_use]
    pub fn with_user_header(mut self, tags: TagList) -> Self {
        self.user_header = Some(tags);
        self
    }

    /// Sets block 4 in line form.
    #[must_use]
    pub fn with_payload(mut self, tags: TagList) -> Self {
        self.payload = Some(tags);
        self.payload_form = PayloadForm::Lines;
        self
    }

    /// Sets block 4 with an explicit layout.
    #[must_use]
    pub fn with_payload_form(mut self, tags: TagList, form: PayloadForm) -> Self {
        self.payload = Some(tags);
        self.payload_form = form;
        self
    }

    /// Sets block 5.
    #[must_use]
    pub fn with_trailer(mut self, tags: TagList) -> Self {
        self.trailer = Some(tags);
        self
    }

    /// Adds a user block after block 5.
    #[must_use]
    pub fn with_user_block(mut self, block: UserBlock) -> Self {
        self.user_blocks.push(block);
        self
    }

    /// Returns block 1.
    #[must_use]
    pub fn basic_header(&self) -> Option<&BasicHeader> {
        self.basic_header.as_ref()
    }

    /// Returns block 2.
    #[must_use]
    pub fn application_header(&self) -> Option<&ApplicationHeader> {
        self.application_header.as_ref()
    }

    /// Returns block 3.
    #[must_use]
    pub fn user_header(&self) -> Option<&TagList> {
        self.user_header.as_ref()
    }

    /// Returns the block 4 tags, empty when block 4 is absent.
    #[must_use]
    pub fn payload(&self) -> &TagList {
        self.payload.as_ref().unwrap_or(&EMPTY_PAYLOAD)
    }

    /// Returns the block 4 tags for appending, creating block 4 if needed.
    pub fn payload_mut(&mut self) -> &mut TagList {
        self.payload.get_or_insert_with(TagList::new)
    }

    /// Returns true if the message carried a block 4.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Returns the block 4 layout.
    #[must_use]
    pub fn payload_form(&self) -> PayloadForm {
        self.payload_form
    }

    /// Returns block 5.
    #[must_use]
    pub fn trailer(&self) -> Option<&TagList> {
        self.trailer.as_ref()
    }

    /// Returns the user blocks, in input order.
    #[must_use]
    pub fn user_blocks(&self) -> &[UserBlock] {
        &self.user_blocks
    }

    /// Returns the message type from block 2.
    #[must_use]
    pub fn message_type(&self) -> Option<MtType> {
        self.application_header
            .as_ref()
            .and_then(ApplicationHeader::message_type)
    }

    /// Returns the validation flag from block 3 field 119.
    #[must_use]
    pub fn variant(&self) -> Option<MtVariant> {
        self.user_header_value(FIELD_VALIDATION_FLAG)
            .and_then(|v| v.parse().ok())
    }

    /// Returns the message user reference from block 3 field 108.
    #[must_use]
    pub fn mur(&self) -> Option<&str> {
        self.user_header_value(FIELD_MUR)
    }

    /// Returns the end-to-end transaction reference from block 3 field 121.
    #[must_use]
    pub fn uetr(&self) -> Option<&str> {
        self.user_header_value(FIELD_UETR)
    }

    /// Returns the first payload tag with the given name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Tag> {
        self.payload().first(name)
    }

    /// Returns every payload tag with the given name.
    #[must_use]
    pub fn fields(&self, name: &str) -> Vec<&Tag> {
        self.payload().all(name)
    }

    fn user_header_value(&self, name: &str) -> Option<&str> {
        self.user_header.as_ref().and_then(|b3| b3.first_value(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header_fields() {
        let header = BasicHeader::from_raw("F01BANKBEBBAXXX2222123456");
        assert_eq!(header.application_id(), Some('F'));
        assert_eq!(header.service_id(), Some("01"));
        assert_eq!(
            header.logical_terminal().map(|lt| lt.to_string()),
            Some("BANKBEBBAXXX".to_string())
        );
        assert_eq!(header.session_number(), Some(2222));
        assert_eq!(header.sequence_number(), Some(123_456));
    }

    #[test]
    fn test_basic_header_short_is_lenient() {
        let header = BasicHeader::from_raw("F01BANK");
        assert_eq!(header.application_id(), Some('F'));
        assert!(header.logical_terminal().is_none());
        assert!(header.sequence_number().is_none());
    }

    #[test]
    fn test_basic_header_builder() {
        let lt = LogicalTerminal::new("BANKBEBBAXXX").unwrap();
        let header = BasicHeader::fin(lt, 12, 345);
        assert_eq!(header.raw(), "F01BANKBEBBAXXX0012000345");
    }

    #[test]
    fn test_input_application_header() {
        let header = ApplicationHeader::from_raw("I103BANKDEFFXXXXU3003");
        assert_eq!(header.direction(), Some(Direction::Input));
        assert_eq!(header.message_type().map(|m| m.to_string()), Some("103".into()));
        assert_eq!(
            header.receiver().map(|lt| lt.to_string()),
            Some("BANKDEFFXXXX".to_string())
        );
        assert_eq!(header.priority(), Some(Priority::Urgent));
        assert_eq!(header.delivery_monitoring(), Some('3'));
        assert_eq!(header.obsolescence_period(), Some(3));
        assert!(header.mir().is_none());
    }

    #[test]
    fn test_output_application_header() {
        let header =
            ApplicationHeader::from_raw("O1031535051028ESPBESMMAXXX54237522470510281535N");
        assert_eq!(header.direction(), Some(Direction::Output));
        assert_eq!(header.message_type().map(|m| m.to_string()), Some("103".into()));
        assert_eq!(header.input_time(), NaiveTime::from_hms_opt(15, 35, 0));
        assert_eq!(header.input_date(), NaiveDate::from_ymd_opt(2005, 10, 28));
        assert_eq!(header.mir(), Some("051028ESPBESMMAXXX5423752247"));
        assert_eq!(
            header.sender().map(|lt| lt.to_string()),
            Some("ESPBESMMAXXX".to_string())
        );
        assert_eq!(header.output_date(), NaiveDate::from_ymd_opt(2005, 10, 28));
        assert_eq!(header.output_time(), NaiveTime::from_hms_opt(15, 35, 0));
        assert_eq!(header.priority(), Some(Priority::Normal));
        assert!(header.receiver().is_none());
    }

    #[test]
    fn test_envelope_metadata() {
        let mut b3 = TagList::new();
        b3.append_field("108", "MUR123");
        b3.append_field("119", "STP");
        b3.append_field("121", "eb6305c9-1f7f-49de-aed0-16487c27b42d");
        let env = Envelope::new()
            .with_application_header(ApplicationHeader::from_raw("I103BANKDEFFXXXXN"))
            .with_user_header(b3);

        assert_eq!(env.mur(), Some("MUR123"));
        assert_eq!(env.variant(), Some(MtVariant::Stp));
        assert!(env.uetr().is_some());
        assert_eq!(env.message_type().map(|m| m.to_string()), Some("103".into()));
    }

    #[test]
    fn test_envelope_payload_absent_is_empty() {
        let mut env = Envelope::new();
        assert!(env.payload().is_empty());
        assert!(!env.has_payload());

        env.payload_mut().append_field("20", "REF");
        assert!(env.has_payload());
        assert_eq!(env.field("20").map(Tag::value), Some("REF"));
        assert_eq!(env.fields("20").len(), 1);
    }
}
