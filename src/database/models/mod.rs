//! Database models.
//!
//! Every row read from the store is decoded into one of these typed records
//! at the repository boundary.

pub mod activity;
pub mod album;
pub mod common;
pub mod playlist;
pub mod song;
pub mod user;

pub use activity::{ActivityAction, PlaylistActivity};
pub use album::Album;
pub use common::{Source, Sourced};
pub use playlist::{PlaylistSongs, PlaylistSummary};
pub use song::{NewSong, Song, SongFilter, SongSummary};
pub use user::User;

pub(crate) use activity::ActivityRow;
pub(crate) use album::AlbumSongRow;
pub(crate) use playlist::PlaylistSongRow;
