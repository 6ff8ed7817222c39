//! Note domain model.
//!
//! # Responsibility
//! - Define the free-form note record owned by one user.
//!
//! # Invariants
//! - `owner_id` and `created_at` never change after creation.
//! - `updated_at >= created_at`.
//! - `title` is stored trimmed and is never empty.

use crate::session::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Validation failures for note input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title is required"),
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub owner_id: UserId,
    pub title: String,
    /// Markdown or plain text body; may be empty.
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note for `owner_id` stamped with `now`.
    pub fn create(
        owner_id: UserId,
        title: &str,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, NoteValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id,
            title: normalize_note_title(title)?,
            content: content.into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces title and content, refreshing `updated_at`.
    pub fn revise(
        &mut self,
        title: &str,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), NoteValidationError> {
        self.title = normalize_note_title(title)?;
        self.content = content.into();
        self.updated_at = now.max(self.created_at);
        Ok(())
    }

    /// Checks invariants on a note read back from storage.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        Ok(())
    }
}

fn normalize_note_title(value: &str) -> Result<String, NoteValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NoteValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}
