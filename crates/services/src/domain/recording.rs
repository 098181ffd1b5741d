use super::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingState {
    pub is_recording: bool,
    pub creator: Option<String>,
}

impl RecordingState {
    pub fn started_by(creator: impl Into<String>) -> Self {
        Self {
            is_recording: true,
            creator: Some(creator.into()),
        }
    }

    pub fn stopped() -> Self {
        Self::default()
    }

    /// A creator is set exactly when a recording is running.
    pub fn is_valid(&self) -> DomainResult<()> {
        match (self.is_recording, self.creator.as_deref()) {
            (true, None) => Err(DomainError::invalid(
                "recording state must have a creator while recording",
            )),
            (true, Some("")) | (false, Some("")) => {
                Err(DomainError::invalid("recording creator cannot be empty"))
            }
            (false, Some(creator)) => Err(DomainError::invalid(format!(
                "recording state is not recording but has creator {creator}"
            ))),
            (true, Some(_)) | (false, None) => Ok(()),
        }
    }
}
