use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

use crate::config::data_dir;
use crate::providers::{Operation, RemoteError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub timestamp: String,
    pub event: String,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Append-only JSONL record of what a run created on the remote board and
/// what failed. Nothing reads it back during a run.
pub struct ActivityLog {
    path: Option<PathBuf>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::at(data_dir().join("activity.jsonl"))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    #[cfg(test)]
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn append(&self, event: &ActivityEvent) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let line = serde_json::to_string(event)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    pub fn created(&self, op: Operation, resource_id: &str, name: &str) {
        let event = new_event("created", op, Some(resource_id), Some(name), None);
        let _ = self.append(&event);
    }

    pub fn failed(&self, err: &RemoteError) {
        let message = err.to_string();
        let event = new_event("failed", err.operation(), None, None, Some(&message));
        let _ = self.append(&event);
    }

    pub fn read_events(&self, limit: Option<usize>) -> Vec<ActivityEvent> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        let mut events: Vec<ActivityEvent> = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        if let Some(limit) = limit {
            let len = events.len();
            if len > limit {
                events = events.split_off(len - limit);
            }
        }

        events
    }
}

pub fn new_event(
    event_type: &str,
    op: Operation,
    resource_id: Option<&str>,
    name: Option<&str>,
    message: Option<&str>,
) -> ActivityEvent {
    ActivityEvent {
        timestamp: chrono::Utc::now().to_rfc3339(),
        event: event_type.to_string(),
        operation: op.as_str().to_string(),
        resource_id: resource_id.map(String::from),
        name: name.map(String::from),
        message: message.map(String::from),
    }
}
