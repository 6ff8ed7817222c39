//! Note use-case service.
//!
//! # Responsibility
//! - Gate every note operation on an active session.
//! - Provide create/update/get/list/delete APIs scoped to the session owner.
//! - Derive plain-text list previews from note content.
//!
//! # Invariants
//! - Notes owned by another user behave exactly like missing notes.
//! - `update_note` uses full title/content replacement semantics.
//! - List results are sorted by `updated_at DESC, id ASC`.

use crate::clock::Clock;
use crate::model::note::{Note, NoteId, NoteValidationError};
use crate::repo::note_repo::NoteRepository;
use crate::repo::RepoError;
use crate::session::{Session, SessionProvider};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const PREVIEW_MAX_CHARS: usize = 100;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\([^)]*\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\[\]]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// No signed-in user.
    Unauthenticated,
    Validation(NoteValidationError),
    /// Target note does not exist for the current user.
    NoteNotFound(NoteId),
    Repo(RepoError),
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "sign in to manage notes"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            RepoError::NoteValidation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Note plus its derived list preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub note: Note,
    /// Plain-text summary, `None` for empty content.
    pub preview_text: Option<String>,
}

impl From<Note> for NoteRecord {
    fn from(note: Note) -> Self {
        let preview_text = derive_note_preview(&note.content);
        Self { note, preview_text }
    }
}

/// Note service facade over a repository, a session provider and a clock.
pub struct NoteService<R: NoteRepository, S: SessionProvider, C: Clock> {
    repo: R,
    sessions: S,
    clock: C,
}

impl<R: NoteRepository, S: SessionProvider, C: Clock> NoteService<R, S, C> {
    pub fn new(repo: R, sessions: S, clock: C) -> Self {
        Self {
            repo,
            sessions,
            clock,
        }
    }

    /// Creates a note owned by the current user.
    pub fn create_note(&self, title: &str, content: &str) -> NoteServiceResult<NoteRecord> {
        let session = self.require_session()?;
        let note = Note::create(session.user_id, title, content, self.clock.now())?;
        let id = self.repo.create_note(&note)?;
        info!("event=note_create module=service status=ok note_id={id}");

        self.repo
            .get_note(id)?
            .map(NoteRecord::from)
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Replaces title and content of one of the current user's notes.
    pub fn update_note(
        &self,
        id: NoteId,
        title: &str,
        content: &str,
    ) -> NoteServiceResult<NoteRecord> {
        let session = self.require_session()?;
        let mut note = self.require_owned(&session, id)?;
        note.revise(title, content, self.clock.now())?;
        self.repo.update_note(&note)?;
        info!("event=note_update module=service status=ok note_id={id}");

        self.repo
            .get_note(id)?
            .map(NoteRecord::from)
            .ok_or(NoteServiceError::InconsistentState(
                "updated note not found in read-back",
            ))
    }

    /// Deletes one of the current user's notes.
    pub fn delete_note(&self, id: NoteId) -> NoteServiceResult<()> {
        let session = self.require_session()?;
        self.require_owned(&session, id)?;
        self.repo.delete_note(id)?;
        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(())
    }

    pub fn get_note(&self, id: NoteId) -> NoteServiceResult<Option<NoteRecord>> {
        let session = self.require_session()?;
        Ok(self
            .repo
            .get_note(id)?
            .filter(|note| note.owner_id == session.user_id)
            .map(NoteRecord::from))
    }

    /// Lists the current user's notes, most recently updated first.
    pub fn list_notes(&self) -> NoteServiceResult<Vec<NoteRecord>> {
        let session = self.require_session()?;
        let notes = self.repo.list_notes(&session.user_id)?;
        Ok(notes.into_iter().map(NoteRecord::from).collect())
    }

    fn require_session(&self) -> NoteServiceResult<Session> {
        self.sessions
            .current_session()
            .ok_or(NoteServiceError::Unauthenticated)
    }

    fn require_owned(&self, session: &Session, id: NoteId) -> NoteServiceResult<Note> {
        self.repo
            .get_note(id)?
            .filter(|note| note.owner_id == session.user_id)
            .ok_or(NoteServiceError::NoteNotFound(id))
    }
}

/// Derives a one-line plain-text preview from note content.
///
/// Rules:
/// - markdown images are dropped, links keep their label;
/// - markdown symbols are removed and whitespace collapsed;
/// - the first 100 chars are retained.
pub fn derive_note_preview(content: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
}
