//! Companion message protocol.
//!
//! Messages are small key-value dictionaries. Every message carries a `type`
//! discriminator string; the remaining keys depend on the type:
//!
//! | Direction | `type`        | Other keys                                            |
//! |-----------|---------------|-------------------------------------------------------|
//! | inbound   | `ready`       | none                                                  |
//! | inbound   | `new_score`   | `region`, `time` (strings), `score` (int)             |
//! | inbound   | `new_scores`  | `northMorning`, `northAfternoon`, `southMorning`, `southAfternoon` (ints) |
//! | outbound  | `update_all`  | none                                                  |
//! | outbound  | `update_single` | `region`, `time` (strings)                          |
//!
//! Inbound messages with an unknown type, a missing key, a wrong value type,
//! an unrecognised region/time name or a score outside the `i8` range are
//! dropped whole: [`InboundMessage::parse`] returns `None` and nothing is
//! applied.
//!
//! Sending goes through the [`Outbox`] trait, which mirrors the host's
//! three-step begin/write/send API. Each step reports a status code; the
//! first failure becomes a [`SendError`]. Failures are logged by the caller
//! and never retried.

use core::fmt;

use heapless::{String, Vec};
use thiserror::Error;

use crate::model::{Region, Score, TimePeriod};

// =============================================================================
// Protocol Constants
// =============================================================================

/// Inbox buffer size requested when the bridge is opened.
pub const INBOX_SIZE: usize = 128;

/// Outbox buffer size requested when the bridge is opened.
pub const OUTBOX_SIZE: usize = 128;

/// Maximum tuples in one dictionary.
pub const MAX_TUPLES: usize = 8;

/// Maximum length of a string value.
pub const CSTRING_LEN: usize = 16;

/// Bytes of framing per tuple (key, type and length fields).
const TUPLE_HEADER_SIZE: usize = 7;

/// Bytes of framing per dictionary (tuple count).
const DICT_HEADER_SIZE: usize = 1;

pub const TYPE_READY: &str = "ready";
pub const TYPE_NEW_SCORE: &str = "new_score";
pub const TYPE_NEW_SCORES: &str = "new_scores";
pub const TYPE_UPDATE_ALL: &str = "update_all";
pub const TYPE_UPDATE_SINGLE: &str = "update_single";

// =============================================================================
// Keys and Values
// =============================================================================

/// Dictionary keys known to both sides.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageKey {
    Type,
    Region,
    Time,
    Score,
    NorthMorning,
    NorthAfternoon,
    SouthMorning,
    SouthAfternoon,
}

impl MessageKey {
    pub const ALL: [Self; 8] = [
        Self::Type,
        Self::Region,
        Self::Time,
        Self::Score,
        Self::NorthMorning,
        Self::NorthAfternoon,
        Self::SouthMorning,
        Self::SouthAfternoon,
    ];

    /// Key name as used by the companion.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Region => "region",
            Self::Time => "time",
            Self::Score => "score",
            Self::NorthMorning => "northMorning",
            Self::NorthAfternoon => "northAfternoon",
            Self::SouthMorning => "southMorning",
            Self::SouthAfternoon => "southAfternoon",
        }
    }

    /// Look up a key by its companion-side name.
    pub fn from_name(name: &str) -> Option<Self> { Self::ALL.into_iter().find(|key| key.name() == name) }

    /// Key carrying the bulk score for one table cell.
    pub const fn for_cell(
        region: Region,
        time: TimePeriod,
    ) -> Self {
        match (region, time) {
            (Region::North, TimePeriod::Morning) => Self::NorthMorning,
            (Region::North, TimePeriod::Afternoon) => Self::NorthAfternoon,
            (Region::South, TimePeriod::Morning) => Self::SouthMorning,
            (Region::South, TimePeriod::Afternoon) => Self::SouthAfternoon,
        }
    }
}

/// Tuple value: a short string or a 32-bit integer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TupleValue {
    CString(String<CSTRING_LEN>),
    Int32(i32),
}

impl TupleValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::CString(s) => Some(s.as_str()),
            Self::Int32(_) => None,
        }
    }

    pub const fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            Self::CString(_) => None,
        }
    }

    /// Serialized payload size (strings include the terminating NUL).
    fn payload_size(&self) -> usize {
        match self {
            Self::CString(s) => s.len() + 1,
            Self::Int32(_) => 4,
        }
    }
}

/// One key-value pair.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tuple {
    pub key: MessageKey,
    pub value: TupleValue,
}

// =============================================================================
// Status Codes
// =============================================================================

/// Status returned by the messaging transport.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppMessageResult {
    Ok,
    SendTimeout,
    SendRejected,
    NotConnected,
    AppNotRunning,
    InvalidArgs,
    Busy,
    BufferOverflow,
    AlreadyReleased,
    OutOfMemory,
    Closed,
    InternalError,
    InvalidState,
}

impl AppMessageResult {
    /// Numeric status code.
    pub const fn code(self) -> u32 {
        match self {
            Self::Ok => 0,
            Self::SendTimeout => 2,
            Self::SendRejected => 4,
            Self::NotConnected => 8,
            Self::AppNotRunning => 16,
            Self::InvalidArgs => 32,
            Self::Busy => 64,
            Self::BufferOverflow => 128,
            Self::AlreadyReleased => 512,
            Self::OutOfMemory => 4096,
            Self::Closed => 8192,
            Self::InternalError => 16384,
            Self::InvalidState => 32768,
        }
    }

    #[inline]
    pub const fn is_ok(self) -> bool { matches!(self, Self::Ok) }
}

impl fmt::Display for AppMessageResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Status returned by dictionary writes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DictionaryResult {
    Ok,
    NotEnoughStorage,
    InvalidArgs,
    InternalInconsistency,
}

impl DictionaryResult {
    /// Numeric status code.
    pub const fn code(self) -> u32 {
        match self {
            Self::Ok => 0,
            Self::NotEnoughStorage => 2,
            Self::InvalidArgs => 4,
            Self::InternalInconsistency => 8,
        }
    }

    #[inline]
    pub const fn is_ok(self) -> bool { matches!(self, Self::Ok) }
}

impl fmt::Display for DictionaryResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failure of one step of an outbound send.
#[derive(Error, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SendError {
    #[error("Outbox begin failed: {0}")]
    Begin(AppMessageResult),

    #[error("Write failed: {0}")]
    Write(DictionaryResult),

    #[error("Outbox send failed: {0}")]
    Send(AppMessageResult),
}

// =============================================================================
// Dictionary
// =============================================================================

/// Key-value message body with a fixed byte budget.
///
/// Writing a key that is already present replaces its value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Dictionary {
    tuples: Vec<Tuple, MAX_TUPLES>,
    capacity: usize,
}

impl Dictionary {
    /// Empty dictionary with the given serialized size budget.
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            tuples: Vec::new(),
            capacity,
        }
    }

    /// Empty dictionary sized for the inbox.
    pub const fn new() -> Self { Self::with_capacity(INBOX_SIZE) }

    /// Write a string value. Strings longer than [`CSTRING_LEN`] are rejected.
    pub fn write_cstring(
        &mut self,
        key: MessageKey,
        value: &str,
    ) -> DictionaryResult {
        let mut s: String<CSTRING_LEN> = String::new();
        if s.push_str(value).is_err() {
            return DictionaryResult::InvalidArgs;
        }
        self.write(key, TupleValue::CString(s))
    }

    /// Write an integer value.
    pub fn write_int32(
        &mut self,
        key: MessageKey,
        value: i32,
    ) -> DictionaryResult {
        self.write(key, TupleValue::Int32(value))
    }

    fn write(
        &mut self,
        key: MessageKey,
        value: TupleValue,
    ) -> DictionaryResult {
        let existing = self.tuples.iter().position(|t| t.key == key);
        let replaced = existing.map_or(0, |i| TUPLE_HEADER_SIZE + self.tuples[i].value.payload_size());
        if self.serialized_size() - replaced + TUPLE_HEADER_SIZE + value.payload_size() > self.capacity {
            return DictionaryResult::NotEnoughStorage;
        }

        match existing {
            Some(i) => {
                self.tuples[i].value = value;
                DictionaryResult::Ok
            }
            None => match self.tuples.push(Tuple { key, value }) {
                Ok(()) => DictionaryResult::Ok,
                Err(_) => DictionaryResult::NotEnoughStorage,
            },
        }
    }

    /// Value for a key.
    pub fn find(
        &self,
        key: MessageKey,
    ) -> Option<&TupleValue> {
        self.tuples.iter().find(|t| t.key == key).map(|t| &t.value)
    }

    /// String value for a key. `None` if missing or not a string.
    pub fn find_str(
        &self,
        key: MessageKey,
    ) -> Option<&str> {
        self.find(key).and_then(TupleValue::as_str)
    }

    /// Integer value for a key. `None` if missing or not an integer.
    pub fn find_i32(
        &self,
        key: MessageKey,
    ) -> Option<i32> {
        self.find(key).and_then(TupleValue::as_i32)
    }

    /// Size of the dictionary on the wire.
    pub fn serialized_size(&self) -> usize {
        DICT_HEADER_SIZE
            + self
                .tuples
                .iter()
                .map(|t| TUPLE_HEADER_SIZE + t.value.payload_size())
                .sum::<usize>()
    }

    #[inline]
    pub fn len(&self) -> usize { self.tuples.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.tuples.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Tuple> { self.tuples.iter() }

    /// Message type discriminator, if present.
    pub fn message_type(&self) -> Option<&str> { self.find_str(MessageKey::Type) }
}

impl Default for Dictionary {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Inbound Messages
// =============================================================================

/// Scores for all four table cells, as carried by `new_scores`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScoreSet {
    pub north_morning: Score,
    pub north_afternoon: Score,
    pub south_morning: Score,
    pub south_afternoon: Score,
}

impl ScoreSet {
    /// Score for one cell.
    pub const fn get(
        &self,
        region: Region,
        time: TimePeriod,
    ) -> Score {
        match (region, time) {
            (Region::North, TimePeriod::Morning) => self.north_morning,
            (Region::North, TimePeriod::Afternoon) => self.north_afternoon,
            (Region::South, TimePeriod::Morning) => self.south_morning,
            (Region::South, TimePeriod::Afternoon) => self.south_afternoon,
        }
    }

    /// All cells in table order (north morning first).
    pub fn cells(&self) -> impl Iterator<Item = (Region, TimePeriod, Score)> + '_ {
        Region::ALL
            .into_iter()
            .flat_map(|region| TimePeriod::ALL.into_iter().map(move |time| (region, time)))
            .map(|(region, time)| (region, time, self.get(region, time)))
    }
}

/// A validated inbound message.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InboundMessage {
    /// Companion is up; reply with a full update request.
    Ready,
    /// One table cell changed.
    NewScore {
        region: Region,
        time: TimePeriod,
        score: Score,
    },
    /// All four table cells.
    NewScores(ScoreSet),
}

impl InboundMessage {
    /// Validate a received dictionary. `None` means the message is ignored.
    ///
    /// Region and time strings must match exactly. An unknown value drops the
    /// message instead of falling back to South/Afternoon.
    pub fn parse(dict: &Dictionary) -> Option<Self> {
        match dict.message_type()? {
            TYPE_READY => Some(Self::Ready),
            TYPE_NEW_SCORE => {
                let region = Region::from_wire(dict.find_str(MessageKey::Region)?)?;
                let time = TimePeriod::from_wire(dict.find_str(MessageKey::Time)?)?;
                let score = score_value(dict, MessageKey::Score)?;
                Some(Self::NewScore { region, time, score })
            }
            TYPE_NEW_SCORES => Some(Self::NewScores(ScoreSet {
                north_morning: score_value(dict, MessageKey::NorthMorning)?,
                north_afternoon: score_value(dict, MessageKey::NorthAfternoon)?,
                south_morning: score_value(dict, MessageKey::SouthMorning)?,
                south_afternoon: score_value(dict, MessageKey::SouthAfternoon)?,
            })),
            _ => None,
        }
    }

    /// Encode as a dictionary (used by the companion side).
    ///
    /// Every encoding fits the inbox budget; a failed write is a bug.
    pub fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        let mut written = true;
        match self {
            Self::Ready => {
                written &= dict.write_cstring(MessageKey::Type, TYPE_READY).is_ok();
            }
            Self::NewScore { region, time, score } => {
                written &= dict.write_cstring(MessageKey::Type, TYPE_NEW_SCORE).is_ok();
                written &= dict.write_cstring(MessageKey::Region, region.wire_name()).is_ok();
                written &= dict.write_cstring(MessageKey::Time, time.wire_name()).is_ok();
                written &= dict.write_int32(MessageKey::Score, i32::from(*score)).is_ok();
            }
            Self::NewScores(scores) => {
                written &= dict.write_cstring(MessageKey::Type, TYPE_NEW_SCORES).is_ok();
                for (region, time, score) in scores.cells() {
                    written &= dict.write_int32(MessageKey::for_cell(region, time), i32::from(score)).is_ok();
                }
            }
        }
        debug_assert!(written, "{self:?} does not fit the inbox");
        dict
    }
}

/// Integer score for a key, rejected if it does not fit the score type.
fn score_value(
    dict: &Dictionary,
    key: MessageKey,
) -> Option<Score> {
    Score::try_from(dict.find_i32(key)?).ok()
}

/// Requests the watch sends to the companion.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutboundRequest {
    /// Recompute and resend all four scores.
    UpdateAll,
    /// Recompute and resend one score.
    UpdateSingle { region: Region, time: TimePeriod },
}

impl OutboundRequest {
    /// Decode a request received by the companion.
    pub fn parse(dict: &Dictionary) -> Option<Self> {
        match dict.message_type()? {
            TYPE_UPDATE_ALL => Some(Self::UpdateAll),
            TYPE_UPDATE_SINGLE => Some(Self::UpdateSingle {
                region: Region::from_wire(dict.find_str(MessageKey::Region)?)?,
                time: TimePeriod::from_wire(dict.find_str(MessageKey::Time)?)?,
            }),
            _ => None,
        }
    }
}

// =============================================================================
// Outbox
// =============================================================================

/// Host messaging transport, send side.
pub trait Outbox {
    /// Start a new outgoing message.
    fn begin(&mut self) -> AppMessageResult;

    /// Add a string tuple to the message being built.
    fn write_cstring(
        &mut self,
        key: MessageKey,
        value: &str,
    ) -> DictionaryResult;

    /// Send the message being built.
    fn send(&mut self) -> AppMessageResult;
}

/// Run the begin/write/send sequence for a request.
pub fn send_request<O>(
    outbox: &mut O,
    request: OutboundRequest,
) -> Result<(), SendError>
where
    O: Outbox + ?Sized,
{
    let status = outbox.begin();
    if !status.is_ok() {
        return Err(SendError::Begin(status));
    }

    let mut write = |key, value| {
        let status = outbox.write_cstring(key, value);
        if status.is_ok() { Ok(()) } else { Err(SendError::Write(status)) }
    };
    match request {
        OutboundRequest::UpdateAll => write(MessageKey::Type, TYPE_UPDATE_ALL)?,
        OutboundRequest::UpdateSingle { region, time } => {
            write(MessageKey::Type, TYPE_UPDATE_SINGLE)?;
            write(MessageKey::Region, region.wire_name())?;
            write(MessageKey::Time, time.wire_name())?;
        }
    }

    let status = outbox.send();
    if !status.is_ok() {
        return Err(SendError::Send(status));
    }
    Ok(())
}

/// Ask the companion to resend all four scores.
#[inline]
pub fn send_update_all<O>(outbox: &mut O) -> Result<(), SendError>
where
    O: Outbox + ?Sized,
{
    send_request(outbox, OutboundRequest::UpdateAll)
}
