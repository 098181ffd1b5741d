use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::error::{DomainError, DomainResult};

pub use classroom_db::models::PollingStatus as CurrentPollingStatus;

pub const MIN_POLLING_OPTIONS: usize = 2;
pub const MAX_POLLING_OPTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPollingOption {
    pub answer: String,
    pub is_correct: bool,
    pub content: Option<String>,
}

impl CurrentPollingOption {
    pub fn new(answer: impl Into<String>, is_correct: bool) -> Self {
        Self {
            answer: answer.into(),
            is_correct,
            content: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentPollingOptions(Vec<CurrentPollingOption>);

impl CurrentPollingOptions {
    pub fn new(options: Vec<CurrentPollingOption>) -> Self {
        Self(options)
    }

    /// Answer text → correctness. A repeated answer keeps its last value.
    pub fn get_answer_map(&self) -> HashMap<&str, bool> {
        self.0
            .iter()
            .map(|option| (option.answer.as_str(), option.is_correct))
            .collect()
    }

    /// Checks option count bounds and that every answer is one of the options.
    pub fn validate_polling_options(&self, answers: &[String]) -> DomainResult<()> {
        if self.0.len() < MIN_POLLING_OPTIONS || self.0.len() > MAX_POLLING_OPTIONS {
            return Err(DomainError::invalid(format!(
                "number of polling options must be between {MIN_POLLING_OPTIONS} and {MAX_POLLING_OPTIONS}, got {}",
                self.0.len()
            )));
        }

        let answer_map = self.get_answer_map();
        for answer in answers {
            if !answer_map.contains_key(answer.as_str()) {
                return Err(DomainError::invalid(format!(
                    "answer {answer} is not exist in polling options"
                )));
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CurrentPollingOption> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<CurrentPollingOption>> for CurrentPollingOptions {
    fn from(options: Vec<CurrentPollingOption>) -> Self {
        Self(options)
    }
}

impl FromIterator<CurrentPollingOption> for CurrentPollingOptions {
    fn from_iter<I: IntoIterator<Item = CurrentPollingOption>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPolling {
    pub options: CurrentPollingOptions,
    pub status: Option<CurrentPollingStatus>,
    pub question: Option<String>,
    pub is_shared_result: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl CurrentPolling {
    /// A started poll over `options`, created now.
    pub fn started(options: CurrentPollingOptions) -> Self {
        let now = Utc::now();
        Self {
            options,
            status: Some(CurrentPollingStatus::Started),
            question: None,
            is_shared_result: false,
            created_at: now,
            updated_at: now,
            stopped_at: None,
            ended_at: None,
        }
    }

    pub fn is_valid(&self) -> DomainResult<()> {
        if self.options.is_empty() {
            return Err(DomainError::invalid("polling options cannot be empty"));
        }

        if let Some(stopped_at) = self.stopped_at {
            if stopped_at < self.created_at {
                return Err(DomainError::invalid(
                    "polling stopped time cannot be before its created time",
                ));
            }
        }
        if let Some(ended_at) = self.ended_at {
            if ended_at < self.created_at {
                return Err(DomainError::invalid(
                    "polling ended time cannot be before its created time",
                ));
            }
        }

        let mut answers: HashMap<&str, bool> = HashMap::with_capacity(self.options.len());
        for option in self.options.iter() {
            match answers.get(option.answer.as_str()) {
                Some(&is_correct) if is_correct != option.is_correct => {
                    return Err(DomainError::invalid(format!(
                        "answer {} is duplicated with a different correctness",
                        option.answer
                    )));
                }
                Some(_) => {}
                None => {
                    answers.insert(option.answer.as_str(), option.is_correct);
                }
            }
        }

        if !answers.values().any(|is_correct| *is_correct) {
            return Err(DomainError::invalid(
                "polling must have at least one correct answer",
            ));
        }

        match self.status {
            None => Err(DomainError::invalid("polling status cannot be empty")),
            Some(CurrentPollingStatus::Stopped) if self.stopped_at.is_none() => Err(
                DomainError::invalid("stopped polling must have a stopped time"),
            ),
            Some(CurrentPollingStatus::Ended) if self.ended_at.is_none() => Err(
                DomainError::invalid("ended polling must have an ended time"),
            ),
            Some(_) => Ok(()),
        }
    }

    pub fn get_answer_map(&self) -> HashMap<&str, bool> {
        self.options.get_answer_map()
    }
}
