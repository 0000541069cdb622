use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::KeyValueStore;

pub type NoteId = u64;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub fixed: bool,
}

/// Owns the note collection persisted as one JSON array under `key`.
pub struct NoteStore<S> {
    storage: S,
    key: String,
    next_id: Cell<NoteId>,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            next_id: Cell::new(0),
        }
    }

    /// Stored order, unsorted. A missing value is an empty collection, and so is
    /// a value that does not parse.
    fn load_stored(&self) -> Result<Vec<Note>, StoreError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => Ok(notes),
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "stored notes are corrupt, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Pinned notes first; notes with the same flag keep their stored order.
    pub fn load_all(&self) -> Result<Vec<Note>, StoreError> {
        let mut notes = self.load_stored()?;
        notes.sort_by_key(|note| !note.fixed);
        Ok(notes)
    }

    pub fn save_all(&self, notes: &[Note]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(notes)?;
        self.storage.set_item(&self.key, &raw)?;
        tracing::debug!(key = %self.key, count = notes.len(), "saved notes");
        Ok(())
    }

    /// Builds an unpinned note with a fresh id. Nothing is written.
    pub fn create(&self, content: impl Into<String>) -> Result<Note, StoreError> {
        let id = self.generate_id()?;
        Ok(Note {
            id,
            content: content.into(),
            fixed: false,
        })
    }

    pub fn append(&self, note: Note) -> Result<(), StoreError> {
        let mut notes = self.load_all()?;
        notes.push(note);
        self.save_all(&notes)
    }

    /// Returns the new pin state, or `None` if no note has this id.
    pub fn toggle_fixed(&self, id: NoteId) -> Result<Option<bool>, StoreError> {
        let mut notes = self.load_all()?;
        let Some(note) = notes.iter_mut().find(|note| note.id == id) else {
            tracing::debug!(id, "toggle on missing note ignored");
            return Ok(None);
        };
        note.fixed = !note.fixed;
        let fixed = note.fixed;
        self.save_all(&notes)?;
        Ok(Some(fixed))
    }

    pub fn update_content(&self, id: NoteId, content: &str) -> Result<Option<()>, StoreError> {
        let mut notes = self.load_all()?;
        let Some(note) = notes.iter_mut().find(|note| note.id == id) else {
            tracing::debug!(id, "edit on missing note ignored");
            return Ok(None);
        };
        if note.content == content {
            return Ok(Some(()));
        }
        note.content = content.to_string();
        self.save_all(&notes)?;
        Ok(Some(()))
    }

    /// Drops every note carrying `id` and returns how many went.
    pub fn remove(&self, id: NoteId) -> Result<usize, StoreError> {
        let mut notes = self.load_all()?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        let removed = before - notes.len();
        if removed > 0 {
            self.save_all(&notes)?;
        }
        Ok(removed)
    }

    pub fn duplicate(&self, id: NoteId) -> Result<Option<Note>, StoreError> {
        let mut notes = self.load_all()?;
        let Some(source) = notes.iter().find(|note| note.id == id) else {
            tracing::debug!(id, "duplicate of missing note ignored");
            return Ok(None);
        };
        let copy = self.create(source.content.clone())?;
        notes.push(copy.clone());
        self.save_all(&notes)?;
        Ok(Some(copy))
    }

    fn generate_id(&self) -> Result<NoteId, StoreError> {
        let floor = self
            .load_stored()?
            .iter()
            .map(|note| note.id.saturating_add(1))
            .max()
            .unwrap_or(0);
        let id = self.next_id.get().max(floor);
        self.next_id.set(id.saturating_add(1));
        Ok(id)
    }
}
