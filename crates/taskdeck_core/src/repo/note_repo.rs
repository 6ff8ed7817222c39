//! Note repository contract and SQLite implementation.
//!
//! # Invariants
//! - `list_notes` only returns rows owned by the requested user, ordered by
//!   `updated_at DESC, id ASC`.
//! - `update_note` rewrites title, content and `updated_at` only.

use super::{from_epoch_ms, parse_uuid, to_epoch_ms, RepoError, RepoResult};
use crate::model::note::{Note, NoteId};
use crate::session::UserId;
use rusqlite::{params, Connection, OptionalExtension, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    owner_id,
    title,
    content,
    created_at,
    updated_at
FROM notes";

/// Storage capability for user notes.
pub trait NoteRepository {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    fn list_notes(&self, owner_id: &UserId) -> RepoResult<Vec<Note>>;
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;

        self.conn.execute(
            "INSERT INTO notes (
                id,
                owner_id,
                title,
                content,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                note.id.to_string(),
                note.owner_id.as_str(),
                note.title.as_str(),
                note.content.as_str(),
                to_epoch_ms(note.created_at),
                to_epoch_ms(note.updated_at),
            ],
        )?;

        Ok(note.id)
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id.to_string()], read_note_columns)
            .optional()?;

        row.map(NoteColumns::into_note).transpose()
    }

    fn list_notes(&self, owner_id: &UserId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE owner_id = ?1
             ORDER BY updated_at DESC, id ASC;"
        ))?;
        let mut rows = stmt.query([owner_id.as_str()])?;
        let mut notes = Vec::new();

        while let Some(row) = rows.next()? {
            notes.push(read_note_columns(row)?.into_note()?);
        }

        Ok(notes)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        note.validate()?;

        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?1,
                content = ?2,
                updated_at = ?3
             WHERE id = ?4;",
            params![
                note.title.as_str(),
                note.content.as_str(),
                to_epoch_ms(note.updated_at),
                note.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

struct NoteColumns {
    id: String,
    owner_id: String,
    title: String,
    content: String,
    created_at: i64,
    updated_at: i64,
}

fn read_note_columns(row: &Row<'_>) -> rusqlite::Result<NoteColumns> {
    Ok(NoteColumns {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl NoteColumns {
    fn into_note(self) -> RepoResult<Note> {
        let note = Note {
            id: parse_uuid(&self.id, "notes.id")?,
            owner_id: UserId::new(self.owner_id),
            title: self.title,
            content: self.content,
            created_at: from_epoch_ms(self.created_at, "notes.created_at")?,
            updated_at: from_epoch_ms(self.updated_at, "notes.updated_at")?,
        };
        note.validate()?;
        Ok(note)
    }
}
