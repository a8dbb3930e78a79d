#![forbid(unsafe_code)]

pub mod game;

pub use game::{LocalProgressStore, PROGRESS_KEY, WebStorageError, create_web_engine};
