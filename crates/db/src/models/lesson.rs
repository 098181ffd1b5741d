use bson::DateTime;
use serde::{Deserialize, Serialize};

use super::room_state::LessonRoomState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub center_id: String,
    pub course_id: Option<String>,
    pub class_id: Option<String>,
    pub scheduler_id: Option<String>,
    #[serde(default)]
    pub teaching_medium: TeachingMedium,
    #[serde(default)]
    pub teaching_method: TeachingMethod,
    #[serde(default)]
    pub scheduling_status: SchedulingStatus,
    pub start_time: DateTime,
    pub end_time: DateTime,
    /// Set when the live session is ended, independent of the scheduled `end_time`.
    pub end_at: Option<DateTime>,
    pub room_id: Option<String>,
    #[serde(default)]
    pub teacher_ids: Vec<String>,
    #[serde(default)]
    pub media_ids: Vec<String>,
    pub total_streaming_slots: Option<u32>,
    /// Learners currently holding a streaming slot.
    #[serde(default)]
    pub learner_ids: Vec<String>,
    #[serde(default)]
    pub stream_learner_counter: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_state: Option<LessonRoomState>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeachingMedium {
    Online,
    #[default]
    Offline,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeachingMethod {
    #[default]
    Individual,
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingStatus {
    #[default]
    Draft,
    Published,
    Completed,
    Canceled,
}

impl Lesson {
    pub const COLLECTION: &'static str = "lessons";
}
