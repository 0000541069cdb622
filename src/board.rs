use leptos::callback::Callback;

use crate::error::StoreError;
use crate::note_store::{Note, NoteId, NoteStore};
use crate::storage::KeyValueStore;

/// One mounted widget. `key` is unique per widget even when stored ids repeat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShownNote {
    pub key: u64,
    pub note: Note,
}

/// The notes currently on screen, in display order.
#[derive(Clone, Debug, Default)]
pub struct Shown {
    items: Vec<ShownNote>,
    next_key: u64,
}

impl Shown {
    pub fn items(&self) -> &[ShownNote] {
        &self.items
    }

    pub fn notes(&self) -> Vec<Note> {
        self.items.iter().map(|item| item.note.clone()).collect()
    }

    fn push(&mut self, note: Note) {
        let key = self.next_key;
        self.next_key += 1;
        self.items.push(ShownNote { key, note });
    }
}

/// What the displayed list has to do after a handler ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Redraw {
    Nothing,
    /// Throw away every widget and rebuild from this list.
    All(Vec<Note>),
    Append(Note),
    Remove(NoteId),
    /// A saved edit; the widget already shows it, only the model catches up.
    Edit(NoteId, String),
}

impl Redraw {
    pub fn apply(self, shown: &mut Shown) {
        match self {
            Redraw::Nothing => {}
            Redraw::All(notes) => {
                shown.items.clear();
                for note in notes {
                    shown.push(note);
                }
            }
            Redraw::Append(note) => shown.push(note),
            Redraw::Remove(id) => shown.items.retain(|item| item.note.id != id),
            Redraw::Edit(id, content) => {
                if let Some(item) = shown.items.iter_mut().find(|item| item.note.id == id) {
                    item.note.content = content;
                }
            }
        }
    }
}

/// Per-widget capabilities. A widget never touches the store itself.
#[derive(Clone, Copy)]
pub struct NoteActions {
    pub on_pin: Callback<NoteId>,
    pub on_delete: Callback<NoteId>,
    pub on_duplicate: Callback<NoteId>,
    pub on_edit: Callback<(NoteId, String)>,
}

pub struct NoteBoard<S> {
    store: NoteStore<S>,
    persist_edits: bool,
}

impl<S: KeyValueStore> NoteBoard<S> {
    pub fn new(store: NoteStore<S>, persist_edits: bool) -> Self {
        Self {
            store,
            persist_edits,
        }
    }

    pub fn render_all(&self) -> Result<Redraw, StoreError> {
        Ok(Redraw::All(self.store.load_all()?))
    }

    pub fn on_add(&self, input: &str) -> Result<Redraw, StoreError> {
        let note = self.store.create(input)?;
        self.store.append(note.clone())?;
        tracing::debug!(id = note.id, "added note");
        Ok(Redraw::Append(note))
    }

    pub fn on_pin(&self, id: NoteId) -> Result<Redraw, StoreError> {
        if self.store.toggle_fixed(id)?.is_none() {
            return Ok(Redraw::Nothing);
        }
        self.render_all()
    }

    /// Removes the widget directly instead of re-rendering the list.
    pub fn on_delete(&self, id: NoteId) -> Result<Redraw, StoreError> {
        self.store.remove(id)?;
        Ok(Redraw::Remove(id))
    }

    pub fn on_duplicate(&self, id: NoteId) -> Result<Redraw, StoreError> {
        if self.store.duplicate(id)?.is_none() {
            return Ok(Redraw::Nothing);
        }
        self.render_all()
    }

    pub fn on_edit(&self, id: NoteId, content: &str) -> Result<Redraw, StoreError> {
        if !self.persist_edits || self.store.update_content(id, content)?.is_none() {
            return Ok(Redraw::Nothing);
        }
        Ok(Redraw::Edit(id, content.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStorage;

    /// Reads succeed, writes fail as if the quota were exhausted.
    struct FullStorage;

    impl KeyValueStore for FullStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Js("QuotaExceededError".to_string()))
        }
    }

    fn board() -> NoteBoard<MemoryStorage> {
        NoteBoard::new(NoteStore::new(MemoryStorage::default(), "notes"), true)
    }

    fn stored(board: &NoteBoard<MemoryStorage>) -> Vec<Note> {
        board.store.load_all().unwrap()
    }

    fn run(shown: &mut Shown, redraw: Result<Redraw, StoreError>) {
        redraw.unwrap().apply(shown);
    }

    #[test]
    fn add_pin_add_delete_scenario() {
        let board = board();
        let mut shown = Shown::default();
        run(&mut shown, board.render_all());
        assert!(shown.items().is_empty());

        run(&mut shown, board.on_add("Buy milk"));
        let milk = stored(&board);
        assert_eq!(milk.len(), 1);
        assert!(!milk[0].fixed);
        let milk_id = milk[0].id;

        run(&mut shown, board.on_pin(milk_id));
        assert!(stored(&board)[0].fixed);

        run(&mut shown, board.on_add("Call Bob"));
        let notes = stored(&board);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].content, "Buy milk");
        let bob_id = notes[1].id;

        run(&mut shown, board.on_delete(bob_id));
        let notes = stored(&board);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "Buy milk");
        assert!(notes[0].fixed);
        assert_eq!(shown.notes(), notes);
    }

    #[test]
    fn add_appends_without_reload() {
        let board = board();
        let note = match board.on_add("").unwrap() {
            Redraw::Append(note) => note,
            other => panic!("expected append, got {other:?}"),
        };
        assert_eq!(note.content, "");
        assert_eq!(stored(&board), vec![note]);
    }

    #[test]
    fn pin_and_duplicate_redraw_everything() {
        let board = board();
        board.on_add("a").unwrap();
        board.on_add("b").unwrap();
        let b = stored(&board)[1].id;

        let mut shown = Shown::default();
        run(&mut shown, board.on_pin(b));
        assert_eq!(shown.notes()[0].content, "b");

        run(&mut shown, board.on_duplicate(b));
        let notes = shown.notes();
        assert_eq!(notes.len(), 3);
        assert_eq!(notes, stored(&board));
        assert_eq!(notes[2].content, "b");
        assert!(!notes[2].fixed);
    }

    #[test]
    fn delete_short_circuits_redraw() {
        let board = board();
        board.on_add("a").unwrap();
        let id = stored(&board)[0].id;
        assert_eq!(board.on_delete(id).unwrap(), Redraw::Remove(id));
    }

    #[test]
    fn stale_ids_leave_display_alone() {
        let board = board();
        assert_eq!(board.on_pin(99).unwrap(), Redraw::Nothing);
        assert_eq!(board.on_duplicate(99).unwrap(), Redraw::Nothing);
        assert_eq!(board.on_edit(99, "x").unwrap(), Redraw::Nothing);
        assert!(stored(&board).is_empty());
    }

    #[test]
    fn edits_persist_only_when_enabled() {
        let board = board();
        board.on_add("draft").unwrap();
        let id = stored(&board)[0].id;
        board.on_edit(id, "final").unwrap();
        assert_eq!(stored(&board)[0].content, "final");

        let frozen = NoteBoard::new(NoteStore::new(MemoryStorage::default(), "notes"), false);
        frozen.on_add("draft").unwrap();
        let id = frozen.store.load_all().unwrap()[0].id;
        frozen.on_edit(id, "final").unwrap();
        assert_eq!(frozen.store.load_all().unwrap()[0].content, "draft");
    }

    #[test]
    fn saved_edit_survives_later_add_and_delete() {
        let board = board();
        let mut shown = Shown::default();
        run(&mut shown, board.on_add("x"));
        run(&mut shown, board.on_add("draft"));
        let ids: Vec<_> = stored(&board).iter().map(|n| n.id).collect();

        run(&mut shown, board.on_edit(ids[1], "final"));
        run(&mut shown, board.on_add("other"));
        assert_eq!(shown.notes(), stored(&board));

        run(&mut shown, board.on_delete(ids[0]));
        assert_eq!(shown.notes(), stored(&board));
        assert_eq!(shown.notes()[0].content, "final");
    }

    #[test]
    fn failed_add_reports_error_and_shows_nothing() {
        let board = NoteBoard::new(NoteStore::new(FullStorage, "notes"), true);
        let result = board.on_add("keep me");
        assert!(matches!(
            result,
            Err(StoreError::Storage(StorageError::Js(_)))
        ));
        assert!(board.store.load_all().unwrap().is_empty());
    }

    #[test]
    fn unsaved_edit_leaves_model_alone() {
        let frozen = NoteBoard::new(NoteStore::new(MemoryStorage::default(), "notes"), false);
        let mut shown = Shown::default();
        run(&mut shown, frozen.on_add("draft"));
        let id = shown.notes()[0].id;
        assert_eq!(frozen.on_edit(id, "final").unwrap(), Redraw::Nothing);
    }

    fn note(id: NoteId, content: &str) -> Note {
        Note {
            id,
            content: content.to_string(),
            fixed: false,
        }
    }

    #[test]
    fn remove_and_append_keep_other_widget_keys() {
        let mut shown = Shown::default();
        Redraw::All(vec![note(1, "a"), note(2, "b"), note(3, "c")]).apply(&mut shown);
        let keys: Vec<_> = shown.items().iter().map(|item| item.key).collect();

        Redraw::Remove(1).apply(&mut shown);
        Redraw::Append(note(4, "d")).apply(&mut shown);
        let after: Vec<_> = shown.items().iter().map(|item| item.key).collect();
        assert_eq!(&after[..2], &keys[1..]);
        assert!(!keys.contains(&after[2]));
    }

    #[test]
    fn duplicate_ids_get_distinct_keys() {
        let mut shown = Shown::default();
        Redraw::All(vec![note(1, "a"), note(1, "b")]).apply(&mut shown);
        assert_ne!(shown.items()[0].key, shown.items()[1].key);
    }

    #[test]
    fn full_redraw_replaces_every_key() {
        let mut shown = Shown::default();
        Redraw::All(vec![note(1, "a")]).apply(&mut shown);
        let first = shown.items()[0].key;
        Redraw::All(vec![note(1, "a")]).apply(&mut shown);
        assert_ne!(shown.items()[0].key, first);
    }

    #[test]
    fn apply_remove_drops_every_widget_with_id() {
        let mut shown = Shown::default();
        Redraw::All(vec![note(1, "a"), note(2, "b"), note(1, "c")]).apply(&mut shown);
        Redraw::Remove(1).apply(&mut shown);
        assert_eq!(shown.notes(), vec![note(2, "b")]);
    }
}
