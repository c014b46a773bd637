use crate::models::{Note, NoteColor};
use crate::storage::{notes_key, Persistence, StorageScope};
use crate::util::NoteStamp;

pub const DEFAULT_TITLE: &str = "New Note";
pub const DEFAULT_CONTENT: &str = "Start typing here...";

/// Values of the create/edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub color: NoteColor,
    pub pinned: bool,
}

impl NoteDraft {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            color: note.color,
            pinned: note.pinned,
        }
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// One user's sticky notes, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct NotesBoard {
    username: String,
    notes: Vec<Note>,
}

impl NotesBoard {
    /// Notes stored without a date or time are given `stamp`'s.
    pub fn load(store: &Persistence, username: &str, stamp: &NoteStamp) -> Self {
        let mut notes: Vec<Note> = store.load_json_list(StorageScope::Durable, &notes_key(username));

        for note in notes.iter_mut() {
            if note.date.is_empty() {
                note.date = stamp.date.clone();
            }
            if note.time.is_empty() {
                note.time = stamp.time.clone();
            }
        }

        Self {
            username: username.to_string(),
            notes,
        }
    }

    fn save(&self, store: &Persistence) {
        store.write_json(StorageScope::Durable, &notes_key(&self.username), &self.notes);
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn unique_id(&self, millis: i64) -> String {
        let mut candidate = millis;
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Appends a note built from `draft`; blank fields get placeholder text.
    pub fn create(&mut self, store: &Persistence, draft: &NoteDraft, stamp: &NoteStamp) -> Note {
        let note = Note {
            id: self.unique_id(stamp.millis),
            title: or_fallback(&draft.title, DEFAULT_TITLE),
            content: or_fallback(&draft.content, DEFAULT_CONTENT),
            color: draft.color,
            date: stamp.date.clone(),
            time: stamp.time.clone(),
            pinned: draft.pinned,
        };
        self.notes.push(note.clone());
        self.save(store);
        note
    }

    /// Blank title/content keep their previous values. Returns `false` for an unknown id.
    pub fn update(&mut self, store: &Persistence, id: &str, draft: &NoteDraft) -> bool {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return false;
        };

        note.title = or_fallback(&draft.title, &note.title);
        note.content = or_fallback(&draft.content, &note.content);
        note.color = draft.color;
        note.pinned = draft.pinned;
        self.save(store);
        true
    }

    pub fn delete(&mut self, store: &Persistence, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return false;
        }
        self.save(store);
        true
    }

    pub fn toggle_pin(&mut self, store: &Persistence, id: &str) -> bool {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        note.pinned = !note.pinned;
        self.save(store);
        true
    }

    /// Pinned notes first; insertion order otherwise.
    pub fn display_order(&self) -> Vec<Note> {
        let (pinned, rest): (Vec<&Note>, Vec<&Note>) =
            self.notes.iter().partition(|n| n.pinned);
        pinned.into_iter().chain(rest).cloned().collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorMode {
    Closed,
    Creating,
    Editing(String),
}

/// State of the create/edit form shown over the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteEditor {
    pub mode: EditorMode,
    pub draft: NoteDraft,
}

impl Default for NoteEditor {
    fn default() -> Self {
        Self {
            mode: EditorMode::Closed,
            draft: NoteDraft::default(),
        }
    }
}

impl NoteEditor {
    pub fn is_open(&self) -> bool {
        self.mode != EditorMode::Closed
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            EditorMode::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn open_new(&mut self) {
        self.mode = EditorMode::Creating;
        self.draft = NoteDraft::default();
    }

    pub fn open_edit(&mut self, note: &Note) {
        self.mode = EditorMode::Editing(note.id.clone());
        self.draft = NoteDraft::from_note(note);
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Creates or updates depending on the mode, then closes the form.
    pub fn submit(&mut self, board: &mut NotesBoard, store: &Persistence, stamp: &NoteStamp) {
        match &self.mode {
            EditorMode::Closed => return,
            EditorMode::Creating => {
                board.create(store, &self.draft, stamp);
            }
            EditorMode::Editing(id) => {
                board.update(store, id, &self.draft);
            }
        }
        self.close();
    }

    /// Dismisses the form if it was editing the deleted note.
    pub fn note_deleted(&mut self, id: &str) {
        if self.editing_id() == Some(id) {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(millis: i64) -> NoteStamp {
        NoteStamp {
            millis,
            date: "Oct 18".to_string(),
            time: "09:15 AM".to_string(),
        }
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_create_with_blank_fields_uses_placeholders() {
        let store = Persistence::in_memory();
        let mut board = NotesBoard::load(&store, "alice", &stamp(0));
        let note = board.create(&store, &NoteDraft::default(), &stamp(1_700_000_000_000));

        assert_eq!(note.title, DEFAULT_TITLE);
        assert_eq!(note.content, DEFAULT_CONTENT);
        assert_eq!(note.id, "1700000000000");
        assert_eq!(note.date, "Oct 18");
        assert_eq!(note.time, "09:15 AM");
        assert!(!note.pinned);
    }

    #[test]
    fn test_ids_stay_unique_within_one_millisecond() {
        let store = Persistence::in_memory();
        let mut board = NotesBoard::load(&store, "alice", &stamp(0));
        let a = board.create(&store, &NoteDraft::default(), &stamp(5));
        let b = board.create(&store, &NoteDraft::default(), &stamp(5));
        assert_ne!(a.id, b.id);
        assert_eq!(b.id, "6");
    }

    #[test]
    fn test_pinned_note_is_listed_first() {
        let store = Persistence::in_memory();
        let mut board = NotesBoard::load(&store, "alice", &stamp(0));
        let draft = |title: &str| NoteDraft {
            title: title.to_string(),
            ..Default::default()
        };
        board.create(&store, &draft("first"), &stamp(1));
        let second = board.create(&store, &draft("second"), &stamp(2));
        board.create(&store, &draft("third"), &stamp(3));

        assert!(board.toggle_pin(&store, &second.id));
        assert_eq!(titles(&board.display_order()), vec!["second", "first", "third"]);
        assert_eq!(titles(board.notes()), vec!["first", "second", "third"]);

        board.toggle_pin(&store, &second.id);
        assert_eq!(titles(&board.display_order()), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_pinned_notes_keep_relative_order() {
        let store = Persistence::in_memory();
        let mut board = NotesBoard::load(&store, "alice", &stamp(0));
        for (i, title) in ["a", "b", "c", "d"].iter().enumerate() {
            board.create(
                &store,
                &NoteDraft {
                    title: title.to_string(),
                    pinned: i % 2 == 1,
                    ..Default::default()
                },
                &stamp(i as i64),
            );
        }
        assert_eq!(titles(&board.display_order()), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_update_falls_back_to_previous_values() {
        let store = Persistence::in_memory();
        let mut board = NotesBoard::load(&store, "alice", &stamp(0));
        let note = board.create(
            &store,
            &NoteDraft {
                title: "Groceries".to_string(),
                content: "Milk".to_string(),
                ..Default::default()
            },
            &stamp(1),
        );

        let changed = board.update(
            &store,
            &note.id,
            &NoteDraft {
                title: String::new(),
                content: "Milk, eggs".to_string(),
                color: NoteColor::Green,
                pinned: true,
            },
        );
        assert!(changed);

        let updated = board.get(&note.id).expect("note should exist");
        assert_eq!(updated.title, "Groceries");
        assert_eq!(updated.content, "Milk, eggs");
        assert_eq!(updated.color, NoteColor::Green);
        assert!(updated.pinned);
        assert_eq!(updated.date, note.date);

        assert!(!board.update(&store, "missing", &NoteDraft::default()));
    }

    #[test]
    fn test_delete_and_persistence() {
        let store = Persistence::in_memory();
        let mut board = NotesBoard::load(&store, "alice", &stamp(0));
        let keep = board.create(&store, &NoteDraft::default(), &stamp(1));
        let gone = board.create(&store, &NoteDraft::default(), &stamp(2));

        assert!(board.delete(&store, &gone.id));
        assert!(!board.delete(&store, &gone.id));

        let reloaded = NotesBoard::load(&store, "alice", &stamp(0));
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.notes()[0].id, keep.id);
        assert!(NotesBoard::load(&store, "bob", &stamp(0)).is_empty());
    }

    #[test]
    fn test_load_fills_missing_stamp() {
        let store = Persistence::in_memory();
        store.write(
            StorageScope::Durable,
            "notes_alice",
            r#"[{"id":"1","title":"t","content":"c","color":"bg-pink-100 border-pink-200","pinned":true}]"#,
        );

        let board = NotesBoard::load(&store, "alice", &stamp(0));
        let note = &board.notes()[0];
        assert_eq!(note.date, "Oct 18");
        assert_eq!(note.time, "09:15 AM");
        assert_eq!(note.color, NoteColor::Pink);
        assert!(note.pinned);
    }

    #[test]
    fn test_unreadable_note_does_not_wipe_the_board() {
        let store = Persistence::in_memory();
        store.write(
            StorageScope::Durable,
            "notes_alice",
            r#"[
                {"id":"1","title":"keep me","content":"c","color":"bg-green-100 border-green-200"},
                {"id":"2","title":"no color","content":"c"},
                {"id":"3","content":"odd color","color":"bg-teal-100"},
                {"title":"no id"}
            ]"#,
        );

        let mut board = NotesBoard::load(&store, "alice", &stamp(0));
        assert_eq!(titles(board.notes()), vec!["keep me", "no color", ""]);
        assert_eq!(board.notes()[1].color, NoteColor::Blue);
        assert_eq!(board.notes()[2].color, NoteColor::Blue);

        board.create(&store, &NoteDraft::default(), &stamp(9));

        let reloaded = NotesBoard::load(&store, "alice", &stamp(0));
        assert_eq!(reloaded.len(), 4);
        assert_eq!(reloaded.notes()[0].title, "keep me");
        assert_eq!(reloaded.notes()[0].color, NoteColor::Green);
    }

    #[test]
    fn test_editor_create_and_edit() {
        let store = Persistence::in_memory();
        let mut board = NotesBoard::load(&store, "alice", &stamp(0));
        let mut editor = NoteEditor::default();
        assert!(!editor.is_open());

        editor.open_new();
        editor.draft.title = "Plan".to_string();
        editor.submit(&mut board, &store, &stamp(10));
        assert!(!editor.is_open());
        assert_eq!(board.len(), 1);

        let note = board.notes()[0].clone();
        editor.open_edit(&note);
        assert_eq!(editor.editing_id(), Some(note.id.as_str()));
        assert_eq!(editor.draft.title, "Plan");
        editor.draft.content = "Visit Lisbon".to_string();
        editor.submit(&mut board, &store, &stamp(20));

        assert_eq!(board.len(), 1);
        assert_eq!(board.notes()[0].content, "Visit Lisbon");
    }

    #[test]
    fn test_deleting_edited_note_dismisses_form() {
        let store = Persistence::in_memory();
        let mut board = NotesBoard::load(&store, "alice", &stamp(0));
        let a = board.create(&store, &NoteDraft::default(), &stamp(1));
        let b = board.create(&store, &NoteDraft::default(), &stamp(2));

        let mut editor = NoteEditor::default();
        editor.open_edit(&a);

        board.delete(&store, &b.id);
        editor.note_deleted(&b.id);
        assert!(editor.is_open());

        board.delete(&store, &a.id);
        editor.note_deleted(&a.id);
        assert!(!editor.is_open());
    }
}
