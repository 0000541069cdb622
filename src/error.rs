use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("browser local storage is unavailable")]
    Unavailable,
    #[error("storage call failed: {0}")]
    Js(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode notes: {0}")]
    Encode(#[from] serde_json::Error),
}
