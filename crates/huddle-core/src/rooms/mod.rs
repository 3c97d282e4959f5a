//! Room directory: the model types and the in-memory store with the
//! join/leave/delete rules.

pub mod model;
pub mod store;

pub use model::{ActivityKind, ParseActivityError, Room, RoomDraft, RoomId};
pub use store::{RoomError, RoomStore};
