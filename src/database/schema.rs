//! Database schema bootstrap.

use sqlx::SqlitePool;

/// Create every table if it does not exist yet. Idempotent.
pub async fn run_migrations(pool: &SqlitePool) -> sqlx::Result<()> {
    // Users
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            fullname TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Albums
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            year INTEGER NOT NULL,
            cover_url TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Songs keep living when their album goes away
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            year INTEGER NOT NULL,
            genre TEXT NOT NULL,
            performer TEXT NOT NULL,
            duration INTEGER,
            album_id TEXT REFERENCES albums(id) ON DELETE SET NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_album ON songs(album_id)")
        .execute(pool)
        .await?;

    // Playlists are owned by username
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS playlists (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            owner TEXT NOT NULL REFERENCES users(username) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_playlists_owner ON playlists(owner)")
        .execute(pool)
        .await?;

    // Collaborations
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS collaborations (
            id TEXT PRIMARY KEY,
            playlist_id TEXT NOT NULL REFERENCES playlists(id) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            UNIQUE(playlist_id, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Playlist membership
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS playlist_songs (
            playlist_id TEXT NOT NULL REFERENCES playlists(id) ON DELETE CASCADE,
            song_id TEXT NOT NULL REFERENCES songs(id) ON DELETE CASCADE,
            PRIMARY KEY (playlist_id, song_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_playlist_songs_song ON playlist_songs(song_id)")
        .execute(pool)
        .await?;

    // Activity audit trail; time is unix milliseconds
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS playlist_activities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            playlist_id TEXT NOT NULL REFERENCES playlists(id) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            song_id TEXT NOT NULL REFERENCES songs(id) ON DELETE CASCADE,
            action TEXT NOT NULL CHECK (action IN ('add', 'delete')),
            time INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_playlist_activities_playlist ON playlist_activities(playlist_id, time)",
    )
    .execute(pool)
    .await?;

    // Album likes
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_album_likes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            album_id TEXT NOT NULL REFERENCES albums(id) ON DELETE CASCADE,
            UNIQUE(user_id, album_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
