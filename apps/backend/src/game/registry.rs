//! Active sessions owned by the lobby.

use std::collections::HashMap;

use actix::Addr;

use crate::domain::SEATS;
use crate::game::ids::{ConnId, RoomId};
use crate::game::room::RoomActor;

pub struct RoomEntry {
    pub addr: Addr<RoomActor>,
    pub seats: [ConnId; SEATS],
}

impl RoomEntry {
    pub fn has_seat(&self, conn: ConnId) -> bool {
        self.seats.contains(&conn)
    }
}

#[derive(Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, RoomEntry>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: RoomId, entry: RoomEntry) {
        self.rooms.insert(id, entry);
    }

    pub fn get(&self, id: RoomId) -> Option<&RoomEntry> {
        self.rooms.get(&id)
    }

    pub fn remove(&mut self, id: RoomId) -> Option<RoomEntry> {
        self.rooms.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
