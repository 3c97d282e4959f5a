use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use super::model::{ActivityKind, Room, RoomDraft, RoomId};

/// Why a room operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    #[error("room {0} not found")]
    NotFound(RoomId),
    #[error("room is full")]
    Full,
    #[error("you have already joined this room")]
    AlreadyJoined,
    #[error("you are not a participant of this room")]
    NotParticipant,
    #[error("only the host can delete a room")]
    NotHost,
}

/// In-memory directory of rooms, newest first.
#[derive(Debug)]
pub struct RoomStore {
    rooms: Vec<Room>,
    next_id: RoomId,
}

impl RoomStore {
    pub fn new() -> Self {
        Self {
            rooms: Vec::new(),
            next_id: 1,
        }
    }

    /// Store pre-seeded with the demonstration rooms, scheduled relative to
    /// `base` so they show up as upcoming.
    pub fn with_sample_rooms(base: NaiveDate) -> Self {
        let mut store = Self::new();
        store.create(RoomDraft {
            name: "Basketball Pickup Game".to_string(),
            activity: ActivityKind::Sports,
            host: "Mike Liu".to_string(),
            location: "CityU Sports Complex Court 2".to_string(),
            date: base + Days::new(2),
            time: NaiveTime::from_hms_opt(16, 30, 0).unwrap_or_default(),
            max_participants: 10,
            description: "Casual basketball game, all levels welcome!".to_string(),
        });
        store.create(RoomDraft {
            name: "Chess Tournament".to_string(),
            activity: ActivityKind::BoardGames,
            host: "Alice Wang".to_string(),
            location: "Library Study Room 301".to_string(),
            date: base + Days::new(1),
            time: NaiveTime::from_hms_opt(14, 0, 0).unwrap_or_default(),
            max_participants: 8,
            description: "Friendly chess tournament for all skill levels!".to_string(),
        });
        // Give the samples a second participant each, like any room that
        // has been up for a day.
        if let Some(room) = store.rooms.iter_mut().find(|r| r.host == "Alice Wang") {
            room.participants.push("Bob Chen".to_string());
        }
        if let Some(room) = store.rooms.iter_mut().find(|r| r.host == "Mike Liu") {
            room.participants.push("Sarah Wong".to_string());
            room.participants.push("David Lee".to_string());
        }
        store
    }

    /// Add a room. The host joins automatically and the room is prepended
    /// so the newest listing shows first.
    pub fn create(&mut self, draft: RoomDraft) -> &Room {
        let id = self.next_id;
        self.next_id += 1;
        let room = Room {
            id,
            name: draft.name,
            activity: draft.activity,
            host: draft.host.clone(),
            location: draft.location,
            date: draft.date,
            time: draft.time,
            max_participants: draft.max_participants,
            participants: vec![draft.host],
            description: draft.description,
        };
        self.rooms.insert(0, room);
        &self.rooms[0]
    }

    /// All rooms, or only those matching the activity filter.
    pub fn list(&self, filter: Option<ActivityKind>) -> Vec<&Room> {
        self.rooms
            .iter()
            .filter(|room| filter.is_none_or(|kind| room.activity == kind))
            .collect()
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn join(&mut self, id: RoomId, username: &str) -> Result<(), RoomError> {
        let room = self.get_mut(id)?;
        if room.has_participant(username) {
            return Err(RoomError::AlreadyJoined);
        }
        if room.is_full() {
            return Err(RoomError::Full);
        }
        room.participants.push(username.to_string());
        Ok(())
    }

    pub fn leave(&mut self, id: RoomId, username: &str) -> Result<(), RoomError> {
        let room = self.get_mut(id)?;
        let position = room
            .participants
            .iter()
            .position(|p| p == username)
            .ok_or(RoomError::NotParticipant)?;
        room.participants.remove(position);
        Ok(())
    }

    /// Remove a room. Only its host may do this.
    pub fn delete(&mut self, id: RoomId, username: &str) -> Result<Room, RoomError> {
        let index = self
            .rooms
            .iter()
            .position(|room| room.id == id)
            .ok_or(RoomError::NotFound(id))?;
        if self.rooms[index].host != username {
            return Err(RoomError::NotHost);
        }
        Ok(self.rooms.remove(index))
    }

    /// The next room starting at or after `now`, for the dashboard clock.
    pub fn next_upcoming(&self, now: NaiveDateTime) -> Option<&Room> {
        self.rooms
            .iter()
            .filter(|room| room.starts_at() >= now)
            .min_by_key(|room| room.starts_at())
    }

    fn get_mut(&mut self, id: RoomId) -> Result<&mut Room, RoomError> {
        self.rooms
            .iter_mut()
            .find(|room| room.id == id)
            .ok_or(RoomError::NotFound(id))
    }
}

impl Default for RoomStore {
    fn default() -> Self {
        Self::new()
    }
}
