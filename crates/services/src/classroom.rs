use std::sync::Arc;

use bson::DateTime;
use classroom_config::StreamingSettings;
use mongodb::Database;
use thiserror::Error;
use tracing::{info, warn};

use crate::dao::{ClassroomDao, DaoError, LessonDao, LessonStreamingProvider, UserDao};
use crate::domain::{
    ClassroomPorts, DomainError, RecordingState, VirtualClassroom, VirtualClassroomBuilder,
    VirtualRoom,
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Dao(#[from] DaoError),
}

impl ServiceError {
    /// True when the lesson does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Dao(DaoError::NotFound))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

pub struct ClassroomService {
    dao: ClassroomDao,
    lessons: Arc<LessonDao>,
    ports: ClassroomPorts,
}

impl ClassroomService {
    pub fn new(db: &Database, streaming: &StreamingSettings) -> Self {
        let lessons = Arc::new(LessonDao::new(db));
        let ports = ClassroomPorts::new(
            Arc::new(UserDao::new(db)),
            lessons.clone(),
            Arc::new(LessonStreamingProvider::new(
                db,
                streaming.room_id_length,
                streaming.default_total_slots,
            )),
        );
        Self {
            dao: ClassroomDao::new(db, streaming.default_total_slots),
            lessons,
            ports,
        }
    }

    pub fn ports(&self) -> &ClassroomPorts {
        &self.ports
    }

    pub async fn get_classroom(&self, lesson_id: &str) -> ServiceResult<VirtualClassroom> {
        Ok(self.dao.find_classroom(lesson_id).await?)
    }

    pub async fn validate_classroom(&self, lesson_id: &str) -> ServiceResult<VirtualClassroom> {
        let classroom = self.get_classroom(lesson_id).await?;
        if let Err(e) = classroom.is_valid(&self.ports).await {
            warn!(lesson_id, error = %e, "Classroom is invalid");
            return Err(e.into());
        }
        Ok(classroom)
    }

    /// Replaces the live room of the lesson once the resulting classroom validates.
    pub async fn update_room(
        &self,
        lesson_id: &str,
        room: VirtualRoom,
    ) -> ServiceResult<VirtualClassroom> {
        let current = self.get_classroom(lesson_id).await?;
        let mut builder = VirtualClassroomBuilder::new()
            .with_id(current.id)
            .with_room(room)
            .with_lesson(current.lesson);
        if let (Some(created_at), Some(updated_at)) = (current.created_at, current.updated_at) {
            builder = builder.with_modification_time(created_at, updated_at);
        }
        let classroom = builder.build(&self.ports).await?;

        if let Some(room) = &classroom.room {
            self.dao.save_room_state(lesson_id, room).await?;
        }
        info!(lesson_id, "Room state updated");
        Ok(classroom)
    }

    /// Creates the streaming room when the lesson has none yet and returns its ID.
    pub async fn open_streaming_room(&self, lesson_id: &str) -> ServiceResult<String> {
        let classroom = self.get_classroom(lesson_id).await?;
        if let Some(room_id) = classroom.lesson.as_ref().and_then(|l| l.room_id.clone()) {
            return Ok(room_id);
        }
        let room = classroom
            .room
            .ok_or_else(|| DomainError::invalid("virtual room cannot be empty"))?;
        let room_id = self
            .ports
            .streaming
            .create_streaming_room(&room)
            .await
            .map_err(|e| DomainError::port("StreamingProviderPort.create_streaming_room", e))?;
        Ok(room_id)
    }

    pub async fn join_stream(&self, lesson_id: &str, learner_id: &str) -> ServiceResult<()> {
        let classroom = self.get_classroom(lesson_id).await?;
        classroom
            .attendee_consume_a_streaming_slot(&self.ports, learner_id)
            .await?;
        info!(lesson_id, learner_id, "Learner joined stream");
        Ok(())
    }

    pub async fn leave_stream(&self, lesson_id: &str, learner_id: &str) -> ServiceResult<()> {
        let classroom = self.get_classroom(lesson_id).await?;
        classroom
            .attendee_release_a_streaming_slot(&self.ports, learner_id)
            .await?;
        info!(lesson_id, learner_id, "Learner left stream");
        Ok(())
    }

    pub async fn streaming_learners(&self, lesson_id: &str) -> ServiceResult<Vec<String>> {
        Ok(self.lessons.get_streaming_learners(lesson_id).await?)
    }

    pub async fn start_recording(&self, lesson_id: &str, creator: &str) -> ServiceResult<()> {
        let recording = RecordingState::started_by(creator);
        recording.is_valid()?;
        let room = VirtualRoom {
            id: lesson_id.to_string(),
            recording_state: Some(recording.clone()),
            ..Default::default()
        };
        room.is_valid_recording_state(self.ports.users.as_ref())
            .await?;

        self.lessons
            .grant_recording_permission(
                lesson_id,
                &classroom_db::models::RecordingState {
                    is_recording: recording.is_recording,
                    creator: recording.creator,
                },
            )
            .await?;
        Ok(())
    }

    pub async fn stop_recording(&self, lesson_id: &str, creator: &str) -> ServiceResult<()> {
        self.lessons
            .stop_recording(lesson_id, creator, &classroom_db::models::RecordingState::default())
            .await?;
        Ok(())
    }

    pub async fn end_live_lesson(&self, lesson_id: &str) -> ServiceResult<()> {
        self.lessons
            .end_live_lesson(lesson_id, DateTime::now())
            .await?;
        Ok(())
    }
}
