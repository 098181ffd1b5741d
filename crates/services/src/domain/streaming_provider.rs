use super::error::{DomainError, DomainResult};

/// Binding between a live room and its streaming vendor room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingProvider {
    pub streaming_room_id: String,
    pub total_streaming_slots: u32,
}

impl StreamingProvider {
    pub fn new(streaming_room_id: impl Into<String>, total_streaming_slots: u32) -> Self {
        Self {
            streaming_room_id: streaming_room_id.into(),
            total_streaming_slots,
        }
    }

    pub fn is_valid(&self) -> DomainResult<()> {
        if self.streaming_room_id.is_empty() {
            return Err(DomainError::invalid("streaming room id cannot be empty"));
        }
        Ok(())
    }
}
