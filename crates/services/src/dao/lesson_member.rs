use bson::{doc, DateTime};
use classroom_db::models::{LessonMember, MemberUserState, StudentAttendStatus};
use mongodb::Database;
use tracing::debug;

use super::base::{BaseDao, DaoResult};

pub struct LessonMemberDao {
    pub base: BaseDao<LessonMember>,
}

impl LessonMemberDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, LessonMember::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        lesson_id: &str,
        user_id: &str,
        course_id: &str,
    ) -> DaoResult<LessonMember> {
        let now = DateTime::now();
        let mut member = LessonMember {
            id: None,
            lesson_id: lesson_id.to_string(),
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            attendance_status: StudentAttendStatus::Empty,
            location_id: None,
            user_state: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let id = self.base.insert_one(&member).await?;
        member.id = id.as_object_id();
        Ok(member)
    }

    pub async fn find_by_lesson(&self, lesson_id: &str) -> DaoResult<Vec<LessonMember>> {
        self.base
            .find_many(
                doc! { "lesson_id": lesson_id, "deleted_at": null },
                Some(doc! { "created_at": 1, "_id": 1 }),
            )
            .await
    }

    /// Requested users that are members of the lesson.
    pub async fn find_member_user_ids(
        &self,
        lesson_id: &str,
        user_ids: &[String],
    ) -> DaoResult<Vec<String>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.base
            .distinct_ids(
                "user_id",
                doc! {
                    "lesson_id": lesson_id,
                    "user_id": { "$in": user_ids.to_vec() },
                    "deleted_at": null,
                },
            )
            .await
    }

    pub async fn update_user_state(
        &self,
        lesson_id: &str,
        user_id: &str,
        state: &MemberUserState,
    ) -> DaoResult<()> {
        debug!(lesson_id, user_id, "Updating member user state");
        self.base
            .update_one_required(
                doc! { "lesson_id": lesson_id, "user_id": user_id, "deleted_at": null },
                doc! { "$set": { "user_state": bson::to_bson(state)? } },
                "update_user_state",
            )
            .await
    }

    /// Drops the live state of every member of the lesson not listed in `keep`.
    pub async fn clear_user_states_except(
        &self,
        lesson_id: &str,
        keep: &[String],
    ) -> DaoResult<u64> {
        let cleared = self
            .base
            .update_many(
                doc! {
                    "lesson_id": lesson_id,
                    "user_id": { "$nin": keep.to_vec() },
                    "user_state": { "$ne": null },
                },
                doc! { "$set": { "user_state": null } },
            )
            .await?;
        debug!(lesson_id, cleared, "Cleared member user states");
        Ok(cleared)
    }

    pub async fn update_attendance_status(
        &self,
        lesson_id: &str,
        user_id: &str,
        status: StudentAttendStatus,
    ) -> DaoResult<()> {
        self.base
            .update_one_required(
                doc! { "lesson_id": lesson_id, "user_id": user_id, "deleted_at": null },
                doc! { "$set": { "attendance_status": bson::to_bson(&status)? } },
                "update_attendance_status",
            )
            .await
    }
}
