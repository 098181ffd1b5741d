use chrono::{DateTime, Utc};

use super::error::{DomainError, DomainResult, ResultExt};

#[derive(Debug, Clone, PartialEq)]
pub struct AttendeeRaisingHandState {
    pub is_raising_hand: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendeeAnnotationState {
    pub be_allowed: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendeePollingAnswerState {
    pub answer: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

/// Live UI state of one attendee.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendeeState {
    pub user_id: String,
    pub raising_hand_state: Option<AttendeeRaisingHandState>,
    pub annotation_state: Option<AttendeeAnnotationState>,
    pub polling_answer: Option<AttendeePollingAnswerState>,
}

impl AttendeeState {
    pub fn is_valid(&self) -> DomainResult<()> {
        if self.user_id.is_empty() {
            return Err(DomainError::invalid("attendee user id cannot be empty"));
        }
        if self.raising_hand_state.is_none() {
            return Err(DomainError::invalid(format!(
                "raising hand state of attendee {} cannot be empty",
                self.user_id
            )));
        }
        if self.annotation_state.is_none() {
            return Err(DomainError::invalid(format!(
                "annotation state of attendee {} cannot be empty",
                self.user_id
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendeeStates(Vec<AttendeeState>);

impl AttendeeStates {
    pub fn new(states: Vec<AttendeeState>) -> Self {
        Self(states)
    }

    pub fn is_valid(&self) -> DomainResult<()> {
        for (i, state) in self.0.iter().enumerate() {
            state
                .is_valid()
                .with_context(|| format!("invalid attendee state at index {i}"))?;
        }
        Ok(())
    }

    pub fn get_attendee_ids(&self) -> Vec<String> {
        self.0.iter().map(|state| state.user_id.clone()).collect()
    }

    pub fn get(&self, user_id: &str) -> Option<&AttendeeState> {
        self.0.iter().find(|state| state.user_id == user_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttendeeState> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<AttendeeState>> for AttendeeStates {
    fn from(states: Vec<AttendeeState>) -> Self {
        Self(states)
    }
}

impl FromIterator<AttendeeState> for AttendeeStates {
    fn from_iter<I: IntoIterator<Item = AttendeeState>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
