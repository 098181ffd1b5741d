use chrono::{DateTime, Utc};
use tracing::debug;

use super::attendee::AttendeeStates;
use super::error::{DomainError, DomainResult, ResultExt};
use super::material::Materials;
use super::polling::CurrentPolling;
use super::ports::{StreamingProviderPort, UserModulePort};
use super::present_material::PresentMaterialState;
use super::recording::RecordingState;
use super::streaming_provider::StreamingProvider;
use super::whiteboard::WhiteboardZoomState;

/// Ephemeral state of a running lesson room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualRoom {
    /// ID of the lesson the room belongs to.
    pub id: String,
    pub streaming_provider: Option<StreamingProvider>,
    pub materials: Materials,
    pub present_material_state: Option<PresentMaterialState>,
    pub current_polling: Option<CurrentPolling>,
    pub recording_state: Option<RecordingState>,
    pub attendee_states: AttendeeStates,
    pub whiteboard_zoom_state: Option<WhiteboardZoomState>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl VirtualRoom {
    pub async fn is_valid(&self, users: &dyn UserModulePort) -> DomainResult<()> {
        let streaming_provider = self
            .streaming_provider
            .as_ref()
            .ok_or_else(|| DomainError::invalid("streaming provider cannot be empty"))?;
        streaming_provider
            .is_valid()
            .context("invalid streaming provider")?;

        self.materials.is_valid().context("invalid materials")?;

        self.is_valid_present_material_state()
            .context("invalid present material state")?;

        if let Some(polling) = &self.current_polling {
            polling.is_valid().context("invalid current polling")?;
        }

        if let Some(zoom) = &self.whiteboard_zoom_state {
            zoom.is_valid().context("invalid whiteboard zoom state")?;
        }

        self.is_valid_recording_state(users)
            .await
            .context("invalid recording state")?;

        self.is_valid_attendee_states(users)
            .await
            .context("invalid attendee states")?;

        Ok(())
    }

    /// The presented material must be one of the room's materials, with the same kind.
    pub fn is_valid_present_material_state(&self) -> DomainResult<()> {
        let Some(state) = &self.present_material_state else {
            return Ok(());
        };

        if self.materials.is_empty() {
            return Err(DomainError::invalid(
                "cannot present a material while the room has no materials",
            ));
        }
        state.is_valid()?;

        if !self.materials.iter().any(|m| state.is_presenting(m)) {
            return Err(DomainError::invalid(format!(
                "presented {} material {} is not in the room's materials",
                state.kind(),
                state.material_id().unwrap_or_default()
            )));
        }
        Ok(())
    }

    pub async fn is_valid_recording_state(&self, users: &dyn UserModulePort) -> DomainResult<()> {
        let Some(recording) = &self.recording_state else {
            return Ok(());
        };
        recording.is_valid()?;

        if let Some(creator) = &recording.creator {
            let requested = [creator.clone()];
            debug!(room_id = %self.id, %creator, "Checking recording creator");
            let presence = users
                .check_existed_user_ids(&requested)
                .await
                .map_err(|e| DomainError::port("UserModulePort.check_existed_user_ids", e))?;
            if !presence.is_present(creator) {
                return Err(DomainError::invalid(format!(
                    "recording creator {creator} is not exist"
                )));
            }
        }
        Ok(())
    }

    pub async fn is_valid_attendee_states(&self, users: &dyn UserModulePort) -> DomainResult<()> {
        if self.attendee_states.is_empty() {
            return Ok(());
        }
        self.attendee_states.is_valid()?;

        if let Some(polling) = &self.current_polling {
            let answer_map = polling.get_answer_map();
            for state in self.attendee_states.iter() {
                let Some(polling_answer) = &state.polling_answer else {
                    continue;
                };
                if let Some(answer) = polling_answer
                    .answer
                    .iter()
                    .find(|a| !answer_map.contains_key(a.as_str()))
                {
                    return Err(DomainError::invalid(format!(
                        "answer {answer} of user {} is not exist in current polling",
                        state.user_id
                    )));
                }
            }
        }

        let attendee_ids = self.attendee_states.get_attendee_ids();
        debug!(room_id = %self.id, count = attendee_ids.len(), "Checking attendees exist");
        let presence = users
            .check_existed_user_ids(&attendee_ids)
            .await
            .map_err(|e| DomainError::port("UserModulePort.check_existed_user_ids", e))?;
        if let Some(missing) = presence.missing(&attendee_ids).first() {
            return Err(DomainError::invalid(format!("attendee {missing} is not exist")));
        }
        Ok(())
    }

    pub async fn attendee_consume_a_streaming_slot(
        &self,
        streaming: &dyn StreamingProviderPort,
        attendee_id: &str,
    ) -> DomainResult<()> {
        streaming
            .attendee_consume_a_streaming_slot(self, attendee_id)
            .await
            .map_err(|e| {
                DomainError::port("StreamingProviderPort.attendee_consume_a_streaming_slot", e)
            })
    }

    pub async fn attendee_release_a_streaming_slot(
        &self,
        streaming: &dyn StreamingProviderPort,
        attendee_id: &str,
    ) -> DomainResult<()> {
        streaming
            .attendee_release_a_streaming_slot(self, attendee_id)
            .await
            .map_err(|e| {
                DomainError::port("StreamingProviderPort.attendee_release_a_streaming_slot", e)
            })
    }
}

#[derive(Debug, Default)]
pub struct VirtualRoomBuilder {
    room: VirtualRoom,
}

impl VirtualRoomBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.room.id = id.into();
        self
    }

    pub fn with_streaming_provider(mut self, provider: impl Into<Option<StreamingProvider>>) -> Self {
        self.room.streaming_provider = provider.into();
        self
    }

    pub fn with_materials(mut self, materials: impl Into<Materials>) -> Self {
        self.room.materials = materials.into();
        self
    }

    pub fn with_present_material_state(
        mut self,
        state: impl Into<Option<PresentMaterialState>>,
    ) -> Self {
        self.room.present_material_state = state.into();
        self
    }

    pub fn with_current_polling(mut self, polling: impl Into<Option<CurrentPolling>>) -> Self {
        self.room.current_polling = polling.into();
        self
    }

    pub fn with_recording_state(mut self, recording: impl Into<Option<RecordingState>>) -> Self {
        self.room.recording_state = recording.into();
        self
    }

    pub fn with_attendee_states(mut self, states: impl Into<AttendeeStates>) -> Self {
        self.room.attendee_states = states.into();
        self
    }

    pub fn with_whiteboard_zoom_state(
        mut self,
        zoom: impl Into<Option<WhiteboardZoomState>>,
    ) -> Self {
        self.room.whiteboard_zoom_state = zoom.into();
        self
    }

    pub fn with_ended_at(mut self, ended_at: Option<DateTime<Utc>>) -> Self {
        self.room.ended_at = ended_at;
        self
    }

    pub async fn build(self, users: &dyn UserModulePort) -> DomainResult<VirtualRoom> {
        self.room.is_valid(users).await?;
        Ok(self.room)
    }

    /// Skips validation; only for rooms hydrated from persisted state.
    pub fn build_draft(self) -> VirtualRoom {
        self.room
    }
}
