use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Identifier for a room; assigned sequentially by the store.
pub type RoomId = u32;

/// What kind of get-together a room hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    BoardGames,
    Sports,
    StudyGroup,
    Gaming,
    Music,
    Other,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 6] = [
        ActivityKind::BoardGames,
        ActivityKind::Sports,
        ActivityKind::StudyGroup,
        ActivityKind::Gaming,
        ActivityKind::Music,
        ActivityKind::Other,
    ];

    /// Human-readable label, e.g. "Board Games".
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::BoardGames => "Board Games",
            ActivityKind::Sports => "Sports",
            ActivityKind::StudyGroup => "Study Group",
            ActivityKind::Gaming => "Gaming",
            ActivityKind::Music => "Music",
            ActivityKind::Other => "Other",
        }
    }

    /// Identifier used in forms and filters, e.g. "board-games".
    pub fn slug(&self) -> &'static str {
        match self {
            ActivityKind::BoardGames => "board-games",
            ActivityKind::Sports => "sports",
            ActivityKind::StudyGroup => "study-group",
            ActivityKind::Gaming => "gaming",
            ActivityKind::Music => "music",
            ActivityKind::Other => "other",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown activity kind: {0}")]
pub struct ParseActivityError(pub String);

impl std::str::FromStr for ActivityKind {
    type Err = ParseActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| ParseActivityError(s.to_string()))
    }
}

/// A meetup room.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub activity: ActivityKind,
    pub host: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub max_participants: usize,
    pub participants: Vec<String>,
    pub description: String,
}

impl Room {
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants
    }

    pub fn has_participant(&self, username: &str) -> bool {
        self.participants.iter().any(|p| p == username)
    }

    pub fn spots_left(&self) -> usize {
        self.max_participants.saturating_sub(self.participants.len())
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Fields supplied by the create-room form; the store assigns the id and
/// seeds the participant list with the host.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDraft {
    pub name: String,
    pub activity: ActivityKind,
    pub host: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub max_participants: usize,
    pub description: String,
}
