use async_trait::async_trait;
use bson::{doc, DateTime};
use classroom_db::models::{
    Lesson, LessonRoomState, RecordingState, TeachingMedium, WhiteboardZoomState,
};
use mongodb::Database;
use tracing::{debug, info};

use super::base::{BaseDao, DaoResult};
use super::lesson_member::LessonMemberDao;
use crate::domain::{PortResult, Presence, VirtualLessonPort};

pub struct LessonDao {
    pub base: BaseDao<Lesson>,
    members: LessonMemberDao,
}

impl LessonDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Lesson::COLLECTION),
            members: LessonMemberDao::new(db),
        }
    }

    pub async fn create(&self, lesson: &Lesson) -> DaoResult<()> {
        self.base.insert_one(lesson).await?;
        info!(lesson_id = %lesson.id, "Lesson created");
        Ok(())
    }

    pub async fn find_by_id(&self, lesson_id: &str) -> DaoResult<Lesson> {
        self.base.find_by_id(lesson_id).await
    }

    pub async fn is_lesson_medium_online(&self, lesson_id: &str) -> DaoResult<bool> {
        let medium = bson::to_bson(&TeachingMedium::Online)?;
        let count = self
            .base
            .count(doc! { "_id": lesson_id, "teaching_medium": medium, "deleted_at": null })
            .await?;
        Ok(count > 0)
    }

    pub async fn update_room_state(
        &self,
        lesson_id: &str,
        state: &LessonRoomState,
    ) -> DaoResult<()> {
        debug!(lesson_id, "Updating room state");
        self.base
            .update_one_required(
                doc! { "_id": lesson_id, "deleted_at": null },
                doc! { "$set": { "room_state": bson::to_bson(state)? } },
                "update_room_state",
            )
            .await
    }

    pub async fn upsert_whiteboard_zoom_state(
        &self,
        lesson_id: &str,
        zoom: &WhiteboardZoomState,
    ) -> DaoResult<()> {
        self.ensure_room_state(lesson_id).await?;
        self.base
            .update_one_required(
                doc! { "_id": lesson_id, "deleted_at": null },
                doc! { "$set": { "room_state.whiteboard_zoom_state": bson::to_bson(zoom)? } },
                "upsert_whiteboard_zoom_state",
            )
            .await
    }

    /// Starts a recording unless one is already running.
    pub async fn grant_recording_permission(
        &self,
        lesson_id: &str,
        recording: &RecordingState,
    ) -> DaoResult<()> {
        self.ensure_room_state(lesson_id).await?;
        self.base
            .update_one_required(
                doc! {
                    "_id": lesson_id,
                    "deleted_at": null,
                    "room_state.recording.is_recording": { "$ne": true },
                },
                doc! { "$set": { "room_state.recording": bson::to_bson(recording)? } },
                "grant_recording_permission",
            )
            .await?;
        info!(lesson_id, creator = ?recording.creator, "Recording permission granted");
        Ok(())
    }

    /// Stops a running recording; only its creator may do so.
    pub async fn stop_recording(
        &self,
        lesson_id: &str,
        creator: &str,
        recording: &RecordingState,
    ) -> DaoResult<()> {
        self.base
            .update_one_required(
                doc! {
                    "_id": lesson_id,
                    "deleted_at": null,
                    "room_state.recording.is_recording": true,
                    "room_state.recording.creator": creator,
                },
                doc! { "$set": { "room_state.recording": bson::to_bson(recording)? } },
                "stop_recording",
            )
            .await?;
        info!(lesson_id, creator, "Recording stopped");
        Ok(())
    }

    /// Binds `room_id` unless the lesson already has a streaming room.
    pub async fn update_room_id(&self, lesson_id: &str, room_id: &str) -> DaoResult<()> {
        self.base
            .update_one_required(
                doc! { "_id": lesson_id, "deleted_at": null, "room_id": null },
                doc! { "$set": { "room_id": room_id } },
                "update_room_id",
            )
            .await
    }

    pub async fn end_live_lesson(&self, lesson_id: &str, end_at: DateTime) -> DaoResult<()> {
        self.base
            .update_one_required(
                doc! { "_id": lesson_id, "deleted_at": null },
                doc! { "$set": { "end_at": end_at } },
                "end_live_lesson",
            )
            .await?;
        info!(lesson_id, "Live lesson ended");
        Ok(())
    }

    pub async fn get_streaming_learners(&self, lesson_id: &str) -> DaoResult<Vec<String>> {
        Ok(self.find_by_id(lesson_id).await?.learner_ids)
    }

    /// Takes a slot when fewer than `max_streamings` learners stream and
    /// `learner_id` does not hold one yet.
    pub async fn increase_number_of_streaming(
        &self,
        lesson_id: &str,
        learner_id: &str,
        max_streamings: u32,
    ) -> DaoResult<()> {
        self.base
            .update_one_required(
                doc! {
                    "_id": lesson_id,
                    "stream_learner_counter": { "$lt": i64::from(max_streamings) },
                    "learner_ids": { "$ne": learner_id },
                },
                doc! {
                    "$inc": { "stream_learner_counter": 1 },
                    "$push": { "learner_ids": learner_id },
                },
                "increase_number_of_streaming",
            )
            .await?;
        debug!(lesson_id, learner_id, "Streaming slot taken");
        Ok(())
    }

    pub async fn decrease_number_of_streaming(
        &self,
        lesson_id: &str,
        learner_id: &str,
    ) -> DaoResult<()> {
        self.base
            .update_one_required(
                doc! {
                    "_id": lesson_id,
                    "stream_learner_counter": { "$gt": 0 },
                    "learner_ids": learner_id,
                },
                doc! {
                    "$inc": { "stream_learner_counter": -1 },
                    "$pull": { "learner_ids": learner_id },
                },
                "decrease_number_of_streaming",
            )
            .await?;
        debug!(lesson_id, learner_id, "Streaming slot released");
        Ok(())
    }

    /// Dotted `$set`s cannot descend into a missing or null `room_state`.
    async fn ensure_room_state(&self, lesson_id: &str) -> DaoResult<()> {
        let empty = bson::to_bson(&LessonRoomState::default())?;
        self.base
            .update_one(
                doc! { "_id": lesson_id, "room_state": null },
                doc! { "$set": { "room_state": empty } },
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl VirtualLessonPort for LessonDao {
    async fn is_lesson_medium_online(&self, lesson_id: &str) -> PortResult<bool> {
        Ok(LessonDao::is_lesson_medium_online(self, lesson_id).await?)
    }

    async fn check_lesson_member_ids(
        &self,
        lesson_id: &str,
        user_ids: &[String],
    ) -> PortResult<Presence> {
        let members = self
            .members
            .find_member_user_ids(lesson_id, user_ids)
            .await?;
        debug!(lesson_id, requested = user_ids.len(), found = members.len(), "Checked lesson members");
        Ok(Presence::from_found(user_ids, members))
    }
}
