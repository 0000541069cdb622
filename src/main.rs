mod app;
mod board;
mod config;
mod error;
mod logging;
mod note_store;
mod storage;

use app::*;
use board::NoteBoard;
use config::Config;
use leptos::prelude::*;
use note_store::NoteStore;
use storage::AnyStorage;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = Config::from_document();
    logging::init(&config.log_filter);
    if let Some(err) = config_error {
        tracing::warn!(%err, "ignoring malformed config block");
    }

    let store = NoteStore::new(AnyStorage::detect(), config.storage_key.clone());
    let board = NoteBoard::new(store, config.persist_edits);
    let placeholder = config.input_placeholder;

    mount_to_body(move || {
        view! { <App board=board input_placeholder=placeholder /> }
    })
}
