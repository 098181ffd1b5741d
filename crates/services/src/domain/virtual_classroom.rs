use chrono::{DateTime, Utc};
use tracing::debug;

use super::error::{DomainError, DomainResult, ResultExt};
use super::ports::ClassroomPorts;
use super::virtual_lesson::VirtualLesson;
use super::virtual_room::VirtualRoom;

/// A lesson together with its live room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualClassroom {
    pub id: String,
    pub room: Option<VirtualRoom>,
    pub lesson: Option<VirtualLesson>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl VirtualClassroom {
    pub async fn is_valid(&self, ports: &ClassroomPorts) -> DomainResult<()> {
        if self.id.is_empty() {
            return Err(DomainError::invalid("virtual classroom id cannot be empty"));
        }

        let room = self.room()?;
        room.is_valid(ports.users.as_ref())
            .await
            .context("invalid virtual room")?;

        let lesson = self.lesson()?;
        lesson
            .is_valid(ports.lessons.as_ref())
            .await
            .context("invalid virtual lesson")?;

        if !room.attendee_states.is_empty() {
            lesson
                .check_lesson_member_ids(
                    ports.lessons.as_ref(),
                    &room.attendee_states.get_attendee_ids(),
                )
                .await
                .context("invalid attendees")?;
        }
        Ok(())
    }

    /// Takes a streaming slot for `attendee_id`, who must be a lesson member.
    pub async fn attendee_consume_a_streaming_slot(
        &self,
        ports: &ClassroomPorts,
        attendee_id: &str,
    ) -> DomainResult<()> {
        let lesson = self.lesson()?;
        let room = self.room()?;
        lesson
            .check_lesson_member_ids(ports.lessons.as_ref(), &[attendee_id.to_string()])
            .await?;

        debug!(classroom_id = %self.id, attendee_id, "Consuming streaming slot");
        room.attendee_consume_a_streaming_slot(ports.streaming.as_ref(), attendee_id)
            .await
    }

    pub async fn attendee_release_a_streaming_slot(
        &self,
        ports: &ClassroomPorts,
        attendee_id: &str,
    ) -> DomainResult<()> {
        debug!(classroom_id = %self.id, attendee_id, "Releasing streaming slot");
        self.room()?
            .attendee_release_a_streaming_slot(ports.streaming.as_ref(), attendee_id)
            .await
    }

    fn room(&self) -> DomainResult<&VirtualRoom> {
        self.room
            .as_ref()
            .ok_or_else(|| DomainError::invalid("virtual room cannot be empty"))
    }

    fn lesson(&self) -> DomainResult<&VirtualLesson> {
        self.lesson
            .as_ref()
            .ok_or_else(|| DomainError::invalid("virtual lesson cannot be empty"))
    }
}

#[derive(Debug, Default)]
pub struct VirtualClassroomBuilder {
    classroom: VirtualClassroom,
}

impl VirtualClassroomBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.classroom.id = id.into();
        self
    }

    pub fn with_room(mut self, room: impl Into<Option<VirtualRoom>>) -> Self {
        self.classroom.room = room.into();
        self
    }

    pub fn with_lesson(mut self, lesson: impl Into<Option<VirtualLesson>>) -> Self {
        self.classroom.lesson = lesson.into();
        self
    }

    pub fn with_modification_time(
        mut self,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        self.classroom.created_at = Some(created_at);
        self.classroom.updated_at = Some(updated_at);
        self
    }

    pub async fn build(self, ports: &ClassroomPorts) -> DomainResult<VirtualClassroom> {
        self.classroom.is_valid(ports).await?;
        Ok(self.classroom)
    }

    pub fn build_draft(self) -> VirtualClassroom {
        self.classroom
    }
}
