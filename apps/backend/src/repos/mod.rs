//! Repository traits for the persistence collaborator.

pub mod matches;


pub use matches::{InMemoryMatchStore, MatchRecord, MatchStore, RoundRecord, SeaMatchStore};
