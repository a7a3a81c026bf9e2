use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MilestoneInputError {
    #[error("date must not be empty")]
    EmptyDate,
    #[error("description must not be empty")]
    EmptyDescription,
}

/// One dated entry ("win") on the timeline.
///
/// `date` is `MM.DD` or a range `MM.DD-MM.DD`; only the start of a range is
/// used for placement. Dates are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub date: String,
    pub desc: String,
}

impl Milestone {
    /// Build a milestone from user input, trimming both fields.
    pub fn new(date: &str, desc: &str) -> Result<Self, MilestoneInputError> {
        Ok(Self {
            date: normalize_date(date)?,
            desc: normalize_description(desc)?,
        })
    }
}

pub fn normalize_date(raw: &str) -> Result<String, MilestoneInputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MilestoneInputError::EmptyDate);
    }
    Ok(trimmed.to_string())
}

pub fn normalize_description(raw: &str) -> Result<String, MilestoneInputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MilestoneInputError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}
