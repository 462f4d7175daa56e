// In-memory caching layer
// Keeps API calls down: every region fills once and is reused for the
// process lifetime

pub mod slot;

pub use slot::{KeyedSlot, Slot};
