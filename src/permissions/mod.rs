//! Permission system for playlists.
//!
//! Ownership is checked first; collaboration is only consulted when the user
//! exists but does not own the playlist.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let authority = PlaylistAuthority::new(&db, &collaborations);
//!
//! authority.verify_access(&playlist_id, &user_id).await?;
//! playlists.add_song_to_playlist(&playlist_id, &song_id, &user_id).await?;
//! ```

mod checker;

pub use checker::{AccessDecision, PlaylistAuthority};
