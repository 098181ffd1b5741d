use bson::DateTime;
use classroom_db::models::{
    ConvertedImage, Lesson, LessonRoomState, MediaType, MemberUserState, SchedulingStatus,
    TeachingMedium, TeachingMethod, UserGroup,
};
use classroom_services::{LessonDao, LessonMemberDao, MediaDao, UserDao};

use super::test_db::TestDb;

/// IDs of a lesson seeded with a teacher, learners and two materials.
pub struct SeededLesson {
    pub lesson_id: String,
    pub teacher_id: String,
    pub learner_ids: Vec<String>,
    pub video_id: String,
    pub pdf_id: String,
}

pub struct LessonSeed {
    pub medium: TeachingMedium,
    pub room_id: Option<String>,
    pub total_streaming_slots: Option<u32>,
    pub learners: usize,
    pub room_state: Option<LessonRoomState>,
}

impl Default for LessonSeed {
    fn default() -> Self {
        Self {
            medium: TeachingMedium::Online,
            room_id: Some("streaming-room-1".to_string()),
            total_streaming_slots: None,
            learners: 2,
            room_state: None,
        }
    }
}

impl TestDb {
    pub async fn seed_user(&self, id: &str, group: UserGroup) {
        UserDao::new(&self.db)
            .create(
                id.to_string(),
                format!("User {id}"),
                format!("{id}@example.com"),
                group,
            )
            .await
            .expect("Failed to seed user");
    }

    pub async fn seed_member(&self, lesson_id: &str, user_id: &str) {
        LessonMemberDao::new(&self.db)
            .create(lesson_id, user_id, "course-1")
            .await
            .expect("Failed to seed lesson member");
    }

    pub async fn set_user_state(&self, lesson_id: &str, user_id: &str, state: &MemberUserState) {
        LessonMemberDao::new(&self.db)
            .update_user_state(lesson_id, user_id, state)
            .await
            .expect("Failed to set member user state");
    }

    /// Seeds a lesson with its users, members and a video plus a pdf material.
    pub async fn seed_lesson(&self, seed: LessonSeed) -> SeededLesson {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let lesson_id = format!("lesson-{suffix}");
        let teacher_id = format!("teacher-{suffix}");
        let video_id = format!("video-{suffix}");
        let pdf_id = format!("pdf-{suffix}");

        self.seed_user(&teacher_id, UserGroup::Teacher).await;
        let mut learner_ids = Vec::with_capacity(seed.learners);
        for i in 0..seed.learners {
            let learner_id = format!("learner-{i}-{suffix}");
            self.seed_user(&learner_id, UserGroup::Student).await;
            learner_ids.push(learner_id);
        }

        let media = MediaDao::new(&self.db);
        media
            .create(
                video_id.clone(),
                "Intro video".to_string(),
                MediaType::Video,
                "yt-video-1".to_string(),
                None,
            )
            .await
            .expect("Failed to seed video");
        media
            .create(
                pdf_id.clone(),
                "Slides".to_string(),
                MediaType::Pdf,
                "https://example.com/slides.pdf".to_string(),
                Some(ConvertedImage {
                    width: 1920,
                    height: 1080,
                    image_url: "https://example.com/slides.png".to_string(),
                }),
            )
            .await
            .expect("Failed to seed pdf");

        let now = DateTime::now();
        let lesson = Lesson {
            id: lesson_id.clone(),
            name: "Algebra".to_string(),
            center_id: "center-1".to_string(),
            course_id: Some("course-1".to_string()),
            class_id: None,
            scheduler_id: None,
            teaching_medium: seed.medium,
            teaching_method: TeachingMethod::Group,
            scheduling_status: SchedulingStatus::Published,
            start_time: now,
            end_time: DateTime::from_millis(now.timestamp_millis() + 3_600_000),
            end_at: None,
            room_id: seed.room_id,
            teacher_ids: vec![teacher_id.clone()],
            media_ids: vec![video_id.clone(), pdf_id.clone()],
            total_streaming_slots: seed.total_streaming_slots,
            learner_ids: Vec::new(),
            stream_learner_counter: 0,
            room_state: seed.room_state,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        LessonDao::new(&self.db)
            .create(&lesson)
            .await
            .expect("Failed to seed lesson");

        self.seed_member(&lesson_id, &teacher_id).await;
        for learner_id in &learner_ids {
            self.seed_member(&lesson_id, learner_id).await;
        }

        SeededLesson {
            lesson_id,
            teacher_id,
            learner_ids,
            video_id,
            pdf_id,
        }
    }
}
