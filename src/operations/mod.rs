//! Operations that build entities in the store.

pub mod creation;
