use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonMember {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub lesson_id: String,
    pub user_id: String,
    pub course_id: String,
    #[serde(default)]
    pub attendance_status: StudentAttendStatus,
    pub location_id: Option<String>,
    /// Live-room state of the member; absent until the member joins the room.
    pub user_state: Option<MemberUserState>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StudentAttendStatus {
    #[default]
    Empty,
    Attend,
    Absent,
    Late,
    LeaveEarly,
    InformedAbsent,
    InformedLate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberUserState {
    pub hands_up: Option<HandsUpState>,
    pub annotation: Option<AnnotationState>,
    pub polling_answer: Option<PollingAnswerState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandsUpState {
    pub value: bool,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationState {
    pub be_allowed: bool,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingAnswerState {
    #[serde(default)]
    pub string_array_value: Vec<String>,
    pub updated_at: DateTime,
}

impl LessonMember {
    pub const COLLECTION: &'static str = "lesson_members";
}
