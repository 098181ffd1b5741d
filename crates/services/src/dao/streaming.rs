use async_trait::async_trait;
use mongodb::Database;
use tracing::{debug, info, warn};

use super::base::DaoError;
use super::lesson::LessonDao;
use crate::domain::{PortResult, StreamingProviderPort, VirtualRoom};

/// Streaming slots backed by the lesson's learner ledger.
pub struct LessonStreamingProvider {
    lessons: LessonDao,
    room_id_length: usize,
    default_total_slots: u32,
}

impl LessonStreamingProvider {
    pub fn new(db: &Database, room_id_length: usize, default_total_slots: u32) -> Self {
        Self {
            lessons: LessonDao::new(db),
            room_id_length,
            default_total_slots,
        }
    }

    fn max_streamings(&self, room: &VirtualRoom) -> u32 {
        room.streaming_provider
            .as_ref()
            .map(|p| p.total_streaming_slots)
            .unwrap_or(self.default_total_slots)
    }
}

#[async_trait]
impl StreamingProviderPort for LessonStreamingProvider {
    async fn create_streaming_room(&self, room: &VirtualRoom) -> PortResult<String> {
        let length = self.room_id_length;
        let room_id = nanoid::nanoid!(length);
        match self.lessons.update_room_id(&room.id, &room_id).await {
            Ok(()) => {
                info!(lesson_id = %room.id, %room_id, "Streaming room created");
                Ok(room_id)
            }
            Err(DaoError::NoRowsUpdated(_)) => {
                // Another caller bound a room first.
                let lesson = self.lessons.find_by_id(&room.id).await?;
                let existing = lesson.room_id.ok_or(DaoError::NotFound)?;
                debug!(lesson_id = %room.id, room_id = %existing, "Streaming room already bound");
                Ok(existing)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn attendee_consume_a_streaming_slot(
        &self,
        room: &VirtualRoom,
        attendee_id: &str,
    ) -> PortResult<()> {
        let max = self.max_streamings(room);
        match self
            .lessons
            .increase_number_of_streaming(&room.id, attendee_id, max)
            .await
        {
            Err(DaoError::NoRowsUpdated(op)) => {
                warn!(lesson_id = %room.id, attendee_id, max, "No streaming slot available");
                Err(DaoError::NoRowsUpdated(op).into())
            }
            other => Ok(other?),
        }
    }

    async fn attendee_release_a_streaming_slot(
        &self,
        room: &VirtualRoom,
        attendee_id: &str,
    ) -> PortResult<()> {
        Ok(self
            .lessons
            .decrease_number_of_streaming(&room.id, attendee_id)
            .await?)
    }
}
