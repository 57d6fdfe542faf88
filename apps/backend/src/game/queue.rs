//! FIFO of connections waiting for an opponent.

use std::collections::VecDeque;

use crate::game::ids::ConnId;

#[derive(Debug, Default)]
pub struct MatchQueue {
    waiting: VecDeque<ConnId>,
}

impl MatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail and return the 1-based position, or `None` if
    /// `conn` is already waiting.
    pub fn push(&mut self, conn: ConnId) -> Option<usize> {
        if self.contains(conn) {
            return None;
        }
        self.waiting.push_back(conn);
        Some(self.waiting.len())
    }

    pub fn remove(&mut self, conn: ConnId) -> bool {
        match self.waiting.iter().position(|c| *c == conn) {
            Some(idx) => {
                self.waiting.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, conn: ConnId) -> bool {
        self.waiting.contains(&conn)
    }

    /// Pop the two oldest entries when at least two are waiting.
    pub fn pop_pair(&mut self) -> Option<(ConnId, ConnId)> {
        if self.waiting.len() < 2 {
            return None;
        }
        let first = self.waiting.pop_front()?;
        let second = self.waiting.pop_front()?;
        Some((first, second))
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}
