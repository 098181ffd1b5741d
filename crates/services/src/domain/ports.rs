//! Capabilities the classroom domain needs from the outside world.
//!
//! Existence checks answer with a [`Presence`] map instead of "the subset
//! that exists", so an adapter has to state an answer for every ID it was
//! asked about. IDs missing from the map still count as absent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::PortResult;
use super::virtual_room::VirtualRoom;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presence(HashMap<String, bool>);

impl Presence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every requested ID absent, then every found ID present.
    pub fn from_found<I, S>(requested: &[String], found: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut presence: HashMap<String, bool> =
            requested.iter().map(|id| (id.clone(), false)).collect();
        for id in found {
            presence.insert(id.into(), true);
        }
        Self(presence)
    }

    pub fn insert(&mut self, id: impl Into<String>, present: bool) {
        self.0.insert(id.into(), present);
    }

    pub fn is_present(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Requested IDs that are not reported present, in request order.
    pub fn missing<'a>(&self, requested: &'a [String]) -> Vec<&'a str> {
        requested
            .iter()
            .filter(|id| !self.is_present(id))
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[async_trait]
pub trait UserModulePort: Send + Sync {
    async fn check_existed_user_ids(&self, user_ids: &[String]) -> PortResult<Presence>;
}

#[async_trait]
pub trait VirtualLessonPort: Send + Sync {
    async fn is_lesson_medium_online(&self, lesson_id: &str) -> PortResult<bool>;

    async fn check_lesson_member_ids(
        &self,
        lesson_id: &str,
        user_ids: &[String],
    ) -> PortResult<Presence>;
}

#[async_trait]
pub trait StreamingProviderPort: Send + Sync {
    /// Creates the vendor-side room and returns its ID.
    async fn create_streaming_room(&self, room: &VirtualRoom) -> PortResult<String>;

    async fn attendee_consume_a_streaming_slot(
        &self,
        room: &VirtualRoom,
        attendee_id: &str,
    ) -> PortResult<()>;

    async fn attendee_release_a_streaming_slot(
        &self,
        room: &VirtualRoom,
        attendee_id: &str,
    ) -> PortResult<()>;
}

/// Port bundle handed to the classroom aggregate.
#[derive(Clone)]
pub struct ClassroomPorts {
    pub users: Arc<dyn UserModulePort>,
    pub lessons: Arc<dyn VirtualLessonPort>,
    pub streaming: Arc<dyn StreamingProviderPort>,
}

impl ClassroomPorts {
    pub fn new(
        users: Arc<dyn UserModulePort>,
        lessons: Arc<dyn VirtualLessonPort>,
        streaming: Arc<dyn StreamingProviderPort>,
    ) -> Self {
        Self {
            users,
            lessons,
            streaming,
        }
    }
}
