//! Seen-chat cache: identity, diffing and persistence
//!
//! The cache is a plain JSON object mapping a derived chat key to the full conversation
//! record that was processed. Only the keys matter for deduplication; records are stored so
//! the file remains a self-contained archive.
//!
//! Default location: `.cache/seen_chats.json`, relative to the working directory.

pub mod diff;
pub mod key;
pub mod persistence;

pub use diff::{diff, seen_keys};
pub use key::derive_key;
pub use persistence::{DEFAULT_CACHE_PATH, load_seen_cache, merge_into_cache, save_seen_cache};
