//! Core data types for study sessions
//!
//! `Session` is the persisted record; `SessionFields` is the plain-data
//! input used by create, update, and the edit buffer.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Field, ValidationError};

/// One logged study activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Session {
    pub(crate) id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) subject: String,
    /// Minutes; non-numeric or missing values in stored data decode as 0
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub(crate) duration: u32,
    /// ISO 8601 calendar date (YYYY-MM-DD)
    #[serde(default)]
    pub(crate) date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) notes: String,
    #[serde(default)]
    pub(crate) completed: bool,
}

impl Session {
    pub(crate) fn from_valid(id: u64, fields: ValidFields) -> Self {
        Session {
            id,
            subject: fields.subject,
            duration: fields.duration,
            date: fields.date,
            notes: fields.notes,
            completed: false,
        }
    }

    /// Replace the mutable fields, keeping `id` and `completed`
    pub(crate) fn apply(&mut self, fields: ValidFields) {
        self.subject = fields.subject;
        self.duration = fields.duration;
        self.date = fields.date;
        self.notes = fields.notes;
    }

    pub(crate) fn fields(&self) -> SessionFields {
        SessionFields {
            subject: self.subject.clone(),
            duration: Some(self.duration),
            date: self.date.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Unvalidated session input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SessionFields {
    pub(crate) subject: String,
    pub(crate) duration: Option<u32>,
    pub(crate) date: String,
    pub(crate) notes: String,
}

/// Session input that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidFields {
    pub(crate) subject: String,
    pub(crate) duration: u32,
    pub(crate) date: String,
    pub(crate) notes: String,
}

impl SessionFields {
    pub(crate) fn validate(&self) -> Result<ValidFields, ValidationError> {
        let mut missing = Vec::new();
        if self.subject.trim().is_empty() {
            missing.push(Field::Subject);
        }
        let duration = self.duration.filter(|d| *d > 0);
        if duration.is_none() {
            missing.push(Field::Duration);
        }
        if self.date.trim().is_empty() {
            missing.push(Field::Date);
        }

        match duration {
            Some(duration) if missing.is_empty() => Ok(ValidFields {
                subject: self.subject.clone(),
                duration,
                date: self.date.clone(),
                notes: self.notes.clone(),
            }),
            _ => Err(ValidationError { missing }),
        }
    }
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let minutes = match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(minutes
        .and_then(|m| u32::try_from(m).ok())
        .unwrap_or_default())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
