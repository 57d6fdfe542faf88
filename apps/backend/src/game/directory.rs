//! Per-connection identity and whereabouts, keyed by [`ConnId`].

use std::collections::HashMap;

use crate::game::ids::{ConnId, RoomId};

const MAX_DISPLAY_NAME_CHARS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Idle,
    Queued,
    Playing(RoomId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub display_name: String,
    pub player_id: Option<i64>,
    pub location: Location,
}

impl ConnectionRecord {
    fn fresh(conn: ConnId) -> Self {
        Self {
            display_name: default_display_name(conn),
            player_id: None,
            location: Location::Idle,
        }
    }
}

pub fn default_display_name(conn: ConnId) -> String {
    format!("Player-{}", conn.short())
}

/// Trimmed and capped; blank names fall back to the default.
pub fn normalize_display_name(raw: Option<&str>, conn: ConnId) -> String {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name.chars().take(MAX_DISPLAY_NAME_CHARS).collect(),
        _ => default_display_name(conn),
    }
}

#[derive(Debug, Default)]
pub struct ConnectionDirectory {
    records: HashMap<ConnId, ConnectionRecord>,
}

impl ConnectionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection as idle. Re-registering resets it.
    pub fn insert(&mut self, conn: ConnId) {
        self.records.insert(conn, ConnectionRecord::fresh(conn));
    }

    pub fn remove(&mut self, conn: ConnId) -> Option<ConnectionRecord> {
        self.records.remove(&conn)
    }

    pub fn get(&self, conn: ConnId) -> Option<&ConnectionRecord> {
        self.records.get(&conn)
    }

    pub fn location(&self, conn: ConnId) -> Option<Location> {
        self.records.get(&conn).map(|r| r.location)
    }

    /// Update identity supplied with `JOIN`.
    pub fn set_profile(&mut self, conn: ConnId, display_name: Option<&str>, player_id: Option<i64>) {
        if let Some(record) = self.records.get_mut(&conn) {
            record.display_name = normalize_display_name(display_name, conn);
            record.player_id = player_id;
        }
    }

    pub fn set_location(&mut self, conn: ConnId, location: Location) {
        if let Some(record) = self.records.get_mut(&conn) {
            record.location = location;
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
