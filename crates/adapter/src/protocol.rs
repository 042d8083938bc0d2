//! Protocol module - JSON message types for the external driver
//!
//! Line-delimited JSON. Every outbound message has: type, seq (sequence number),
//! ts (timestamp in ms).

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::{GameSnapshot, LockEvent};
use crate::types::GameAction;

/// Most actions accepted in one command message
pub const MAX_ACTIONS_PER_COMMAND: usize = 32;

// ============== Driver -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionName(pub GameAction);

impl<'de> Deserialize<'de> for ActionName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        GameAction::from_str(&s)
            .map(ActionName)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown action: {}", s)))
    }
}

impl Serialize for ActionName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionList(pub ArrayVec<ActionName, MAX_ACTIONS_PER_COMMAND>);

impl ActionList {
    pub fn iter(&self) -> impl Iterator<Item = GameAction> + '_ {
        self.0.iter().map(|a| a.0)
    }
}

impl<'de> Deserialize<'de> for ActionList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = ActionList;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "an array of action strings")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut out = ArrayVec::<ActionName, MAX_ACTIONS_PER_COMMAND>::new();
                while let Some(a) = seq.next_element::<ActionName>()? {
                    out.try_push(a)
                        .map_err(|_| serde::de::Error::custom("too many actions"))?;
                }
                Ok(ActionList(out))
            }
        }

        deserializer.deserialize_seq(V)
    }
}

impl Serialize for ActionList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

/// Apply actions in order, then answer with ack + observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMessage {
    pub seq: u64,
    pub actions: ActionList,
}

/// Ask for an observation without changing the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserveMessage {
    pub seq: u64,
}

#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Command(CommandMessage),
    Observe(ObserveMessage),
}

// ============== Game -> Driver Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    #[serde(rename = "unknown_message")]
    UnknownMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

/// Acknowledgment for an applied command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: AckStatus,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Game state observation; the snapshot fields sit at the top level
#[derive(Debug, Clone, Serialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    #[serde(flatten)]
    pub state: GameSnapshot,
    /// Outcome of the last lock during the command, reported once
    #[serde(rename = "lastEvent", skip_serializing_if = "Option::is_none")]
    pub last_event: Option<LockEvent>,
}

/// Any message the game sends
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    Ack(AckMessage),
    Error(ErrorMessage),
    Observation(ObservationMessage),
}

impl OutboundMessage {
    pub fn seq(&self) -> u64 {
        match self {
            OutboundMessage::Ack(m) => m.seq,
            OutboundMessage::Error(m) => m.seq,
            OutboundMessage::Observation(m) => m.seq,
        }
    }
}

/// Why an inbound line was rejected
#[derive(Debug)]
pub struct RejectedMessage {
    /// `seq` of the offending message, when it could be recovered
    pub seq: Option<u64>,
    pub code: ErrorCode,
    pub source: serde_json::Error,
}

/// Parse one inbound line
///
/// An unknown `type` is reported as [`ErrorCode::UnknownMessage`]; anything else that
/// fails to parse (bad JSON, missing fields, unknown action) as
/// [`ErrorCode::InvalidCommand`].
pub fn parse_message(json: &str) -> Result<ParsedMessage, RejectedMessage> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "command")]
        Command(CommandMessage),
        #[serde(rename = "observe")]
        Observe(ObserveMessage),
    }

    #[derive(Debug, Deserialize)]
    struct Envelope {
        #[serde(rename = "type")]
        msg_type: Option<String>,
        seq: Option<u64>,
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Ok(InboundMessage::Observe(m)) => Ok(ParsedMessage::Observe(m)),
        Err(source) => {
            let envelope = serde_json::from_str::<Envelope>(json).ok();
            let seq = envelope.as_ref().and_then(|e| e.seq);
            let code = match envelope.as_ref().and_then(|e| e.msg_type.as_deref()) {
                Some("command") | Some("observe") | None => ErrorCode::InvalidCommand,
                Some(_) => ErrorCode::UnknownMessage,
            };
            Err(RejectedMessage { seq, code, source })
        }
    }
}

/// Create an acknowledgment message
pub fn create_ack(seq: u64) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Create an observation from a snapshot
pub fn create_observation(
    seq: u64,
    state: GameSnapshot,
    last_event: Option<LockEvent>,
) -> ObservationMessage {
    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        state,
        last_event,
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
