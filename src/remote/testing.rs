//! Recording `ShowRemote` double shared by controller and CLI tests

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

use super::{RemoteError, ShowRemote, StatusEntry, STATUS_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Status,
    Sequences,
    Play,
    Stop,
}

#[derive(Debug, Clone)]
pub enum StatusReply {
    Entries(Vec<StatusEntry>),
    Timeout,
}

pub struct RecordingRemote {
    reply: Mutex<StatusReply>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingRemote {
    pub fn new(reply: StatusReply) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_states(states: &[i64]) -> Self {
        Self::new(StatusReply::Entries(
            states.iter().copied().map(StatusEntry::with_state).collect(),
        ))
    }

    pub fn set_reply(&self, reply: StatusReply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().iter().filter(|&&c| c == call).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ShowRemote for RecordingRemote {
    async fn status(&self) -> Result<Vec<StatusEntry>, RemoteError> {
        self.record(Call::Status);
        match self.reply.lock().unwrap().clone() {
            StatusReply::Entries(entries) => Ok(entries),
            StatusReply::Timeout => Err(RemoteError::Timeout { path: STATUS_PATH }),
        }
    }

    async fn sequences(&self) -> Result<Value, RemoteError> {
        self.record(Call::Sequences);
        Ok(json!([{"Name": "Holiday"}]))
    }

    async fn play(&self) -> Result<Value, RemoteError> {
        self.record(Call::Play);
        Ok(json!({}))
    }

    async fn stop(&self) -> Result<Value, RemoteError> {
        self.record(Call::Stop);
        Ok(json!({}))
    }
}
