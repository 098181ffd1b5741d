use chrono::{DateTime, Utc};
use tracing::debug;

use super::error::{DomainError, DomainResult};
use super::ports::VirtualLessonPort;

pub use classroom_db::models::{SchedulingStatus, StudentAttendStatus, TeachingMedium, TeachingMethod};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonLearner {
    pub learner_id: String,
    pub course_id: String,
    pub attend_status: StudentAttendStatus,
    pub location_id: Option<String>,
}

/// Scheduling record of a lesson, as seen by the live classroom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualLesson {
    pub lesson_id: String,
    pub name: String,
    pub center_id: String,
    pub course_id: Option<String>,
    pub class_id: Option<String>,
    pub scheduler_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub scheduling_status: SchedulingStatus,
    pub teaching_medium: TeachingMedium,
    pub teaching_method: TeachingMethod,
    pub learners: Vec<LessonLearner>,
    pub teacher_ids: Vec<String>,
    pub room_id: Option<String>,
    pub end_at: Option<DateTime<Utc>>,
}

impl VirtualLesson {
    pub async fn is_valid(&self, lessons: &dyn VirtualLessonPort) -> DomainResult<()> {
        if self.lesson_id.is_empty() {
            return Err(DomainError::invalid("lesson id cannot be empty"));
        }

        let online = lessons
            .is_lesson_medium_online(&self.lesson_id)
            .await
            .map_err(|e| DomainError::port("VirtualLessonPort.is_lesson_medium_online", e))?;
        if !online {
            return Err(DomainError::invalid(format!(
                "lesson {} is not an online lesson",
                self.lesson_id
            )));
        }
        Ok(())
    }

    /// Fails unless every ID in `user_ids` is a member of this lesson.
    pub async fn check_lesson_member_ids(
        &self,
        lessons: &dyn VirtualLessonPort,
        user_ids: &[String],
    ) -> DomainResult<()> {
        debug!(lesson_id = %self.lesson_id, count = user_ids.len(), "Checking lesson members");
        let presence = lessons
            .check_lesson_member_ids(&self.lesson_id, user_ids)
            .await
            .map_err(|e| DomainError::port("VirtualLessonPort.check_lesson_member_ids", e))?;

        if let Some(missing) = presence.missing(user_ids).first() {
            return Err(DomainError::invalid(format!(
                "user {missing} is not a member of lesson {}",
                self.lesson_id
            )));
        }
        Ok(())
    }

    pub fn get_learner_ids(&self) -> Vec<String> {
        self.learners.iter().map(|l| l.learner_id.clone()).collect()
    }
}

#[derive(Debug, Default)]
pub struct VirtualLessonBuilder {
    lesson: VirtualLesson,
}

impl VirtualLessonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lesson_id(mut self, lesson_id: impl Into<String>) -> Self {
        self.lesson.lesson_id = lesson_id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.lesson.name = name.into();
        self
    }

    pub fn with_center_id(mut self, center_id: impl Into<String>) -> Self {
        self.lesson.center_id = center_id.into();
        self
    }

    pub fn with_course_id(mut self, course_id: Option<String>) -> Self {
        self.lesson.course_id = course_id;
        self
    }

    pub fn with_class_id(mut self, class_id: Option<String>) -> Self {
        self.lesson.class_id = class_id;
        self
    }

    pub fn with_scheduler_id(mut self, scheduler_id: Option<String>) -> Self {
        self.lesson.scheduler_id = scheduler_id;
        self
    }

    pub fn with_modification_time(
        mut self,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        self.lesson.created_at = Some(created_at);
        self.lesson.updated_at = Some(updated_at);
        self
    }

    pub fn with_time(mut self, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        self.lesson.start_time = Some(start_time);
        self.lesson.end_time = Some(end_time);
        self
    }

    pub fn with_scheduling_status(mut self, status: SchedulingStatus) -> Self {
        self.lesson.scheduling_status = status;
        self
    }

    pub fn with_teaching_medium(mut self, medium: TeachingMedium) -> Self {
        self.lesson.teaching_medium = medium;
        self
    }

    pub fn with_teaching_method(mut self, method: TeachingMethod) -> Self {
        self.lesson.teaching_method = method;
        self
    }

    pub fn with_learners(mut self, learners: Vec<LessonLearner>) -> Self {
        self.lesson.learners = learners;
        self
    }

    pub fn with_teacher_ids(mut self, teacher_ids: Vec<String>) -> Self {
        self.lesson.teacher_ids = teacher_ids;
        self
    }

    pub fn with_room_id(mut self, room_id: Option<String>) -> Self {
        self.lesson.room_id = room_id;
        self
    }

    pub fn with_end_at(mut self, end_at: Option<DateTime<Utc>>) -> Self {
        self.lesson.end_at = end_at;
        self
    }

    pub async fn build(self, lessons: &dyn VirtualLessonPort) -> DomainResult<VirtualLesson> {
        self.lesson.is_valid(lessons).await?;
        Ok(self.lesson)
    }

    pub fn build_draft(self) -> VirtualLesson {
        self.lesson
    }
}
