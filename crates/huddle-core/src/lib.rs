pub mod drafts;
pub mod editing;
pub mod markdown;
pub mod notice;
pub mod rooms;
pub mod schedule;

// Re-export key types for easier usage
pub use drafts::{DraftError, DraftSlot, FileDraftSlot, MemoryDraftSlot};
pub use editing::{actions::*, document::*, editor::*, slash::*};
pub use markdown::{preprocess, render};
pub use notice::{Notice, NoticeLevel};
pub use rooms::{model::*, store::*};
