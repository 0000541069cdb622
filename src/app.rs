use leptos::prelude::*;

use crate::board::{NoteActions, NoteBoard, Redraw, Shown, ShownNote};
use crate::error::StoreError;
use crate::note_store::{Note, NoteId};
use crate::storage::AnyStorage;

#[component]
pub fn NoteWidget(note: Note, actions: NoteActions) -> impl IntoView {
    let id = note.id;
    view! {
        <div class="note" class:fixed=note.fixed>
            <textarea
                placeholder="Add Your Notes Here...."
                prop:value=note.content
                on:change=move |ev| actions.on_edit.run((id, event_target_value(&ev)))
            ></textarea>
            <i class="bi bi-pin" title="Pin" on:click=move |_| actions.on_pin.run(id)></i>
            <i class="bi bi-x-lg" title="Delete" on:click=move |_| actions.on_delete.run(id)></i>
            <i class="bi bi-file-earmark-plus" title="Duplicate" on:click=move |_| actions.on_duplicate.run(id)></i>
        </div>
    }
}

#[component]
pub fn App(board: NoteBoard<AnyStorage>, input_placeholder: String) -> impl IntoView {
    // web_sys::Storage is !Send, so the board lives in the local arena.
    let board = StoredValue::new_local(board);
    let (shown, set_shown) = signal(Shown::default());
    let (draft, set_draft) = signal(String::new());

    // Returns whether the handler succeeded.
    let dispatch = move |redraw: Result<Redraw, StoreError>| match redraw {
        Ok(redraw) => {
            set_shown.update(|shown| redraw.apply(shown));
            true
        }
        Err(err) => {
            tracing::error!(%err, "note update failed");
            false
        }
    };

    dispatch(board.with_value(|b| b.render_all()));

    let actions = NoteActions {
        on_pin: Callback::new(move |id: NoteId| {
            dispatch(board.with_value(|b| b.on_pin(id)));
        }),
        on_delete: Callback::new(move |id: NoteId| {
            dispatch(board.with_value(|b| b.on_delete(id)));
        }),
        on_duplicate: Callback::new(move |id: NoteId| {
            dispatch(board.with_value(|b| b.on_duplicate(id)));
        }),
        on_edit: Callback::new(move |(id, content): (NoteId, String)| {
            dispatch(board.with_value(|b| b.on_edit(id, &content)));
        }),
    };

    let on_add = move |_| {
        let input = draft.get_untracked();
        // Keep the typed text if nothing was saved.
        if dispatch(board.with_value(|b| b.on_add(&input))) {
            set_draft.set(String::new());
        }
    };

    view! {
        <main class="notes-app">
            <div class="note-input">
                <input
                    id="note-content"
                    type="text"
                    placeholder=input_placeholder
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                />
                <button class="add-note" title="Add note" on:click=on_add>
                    <i class="bi bi-plus-lg"></i>
                </button>
            </div>
            <div id="notes-container">
                <For
                    each=move || shown.with(|shown| shown.items().to_vec())
                    key=|item: &ShownNote| item.key
                    children=move |item: ShownNote| {
                        view! { <NoteWidget note=item.note actions=actions /> }
                    }
                />
            </div>
        </main>
    }
}
