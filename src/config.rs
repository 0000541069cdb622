use serde::Deserialize;

/// Id of the optional `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "sticky-notes-config";

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Local storage key holding the JSON array of notes.
    pub storage_key: String,
    /// Write textarea edits back when the textarea fires `change`.
    pub persist_edits: bool,
    /// `tracing-subscriber` filter directives, e.g. `"sticky_notes_ui=debug"`.
    pub log_filter: String,
    pub input_placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: "notes".to_string(),
            persist_edits: true,
            log_filter: "info".to_string(),
            input_placeholder: "Write a note...".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the inline config block. Returns the config plus a parse error to
    /// report once logging is up.
    pub fn from_document() -> (Self, Option<serde_json::Error>) {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) if !raw.trim().is_empty() => match Self::from_json(&raw) {
                Ok(config) => (config, None),
                Err(err) => (Self::default(), Some(err)),
            },
            _ => (Self::default(), None),
        }
    }
}
