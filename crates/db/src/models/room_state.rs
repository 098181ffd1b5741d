use bson::DateTime;
use serde::{Deserialize, Serialize};

use super::media::Media;

/// Live-room sub-document stored on the lesson.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonRoomState {
    pub current_material: Option<CurrentMaterial>,
    pub current_polling: Option<CurrentPolling>,
    pub recording: Option<RecordingState>,
    pub whiteboard_zoom_state: Option<WhiteboardZoomState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentMaterial {
    pub media_id: String,
    /// Snapshot of the presented media at the time it was shared.
    pub data: Option<Media>,
    pub video_state: Option<VideoState>,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoState {
    #[serde(default)]
    pub current_time_ms: i64,
    #[serde(default)]
    pub player_state: PlayerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    #[default]
    Unspecified,
    Pause,
    Playing,
    Ended,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentPolling {
    #[serde(default)]
    pub options: Vec<PollingOption>,
    pub status: Option<PollingStatus>,
    pub question: Option<String>,
    #[serde(default)]
    pub is_shared_result: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub stopped_at: Option<DateTime>,
    pub ended_at: Option<DateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingOption {
    pub answer: String,
    pub is_correct: bool,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollingStatus {
    Started,
    Stopped,
    Ended,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordingState {
    #[serde(default)]
    pub is_recording: bool,
    pub creator: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhiteboardZoomState {
    pub pdf_scale_ratio: f64,
    pub pdf_width: f64,
    pub pdf_height: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for WhiteboardZoomState {
    fn default() -> Self {
        Self {
            pdf_scale_ratio: 100.0,
            pdf_width: 1920.0,
            pdf_height: 1080.0,
            center_x: 0.0,
            center_y: 0.0,
        }
    }
}
