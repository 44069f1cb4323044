use anyhow::Result;
use sqlx::{sqlite::SqlitePool, sqlite::SqliteRow, Row};

use crate::model::{File, Song};

const SELECT_SONGS: &str = "SELECT song.id AS id, file.id AS file_id, file.name AS file_name
    FROM song JOIN file ON file.id = song.file_id";

pub struct SongRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SongRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_songs(&self) -> Result<Vec<Song>> {
        let rows = sqlx::query(&format!("{} ORDER BY song.id", SELECT_SONGS))
            .fetch_all(self.pool)
            .await?;

        rows.iter().map(song_from_row).collect()
    }

    pub async fn get_song_by_id(&self, song_id: i64) -> Result<Option<Song>> {
        let row = sqlx::query(&format!("{} WHERE song.id = ?", SELECT_SONGS))
            .bind(song_id)
            .fetch_optional(self.pool)
            .await?;

        row.as_ref().map(song_from_row).transpose()
    }

    /// Inserts the file row and the song pointing at it in one transaction.
    pub async fn create_song(&self, file_name: &str) -> Result<Song> {
        let mut tx = self.pool.begin().await?;

        let file_id = sqlx::query("INSERT INTO file (name) VALUES (?)")
            .bind(file_name)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        let song_id = sqlx::query("INSERT INTO song (file_id) VALUES (?)")
            .bind(file_id)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        tx.commit().await?;

        Ok(Song {
            id: song_id,
            file: File { id: file_id, name: file_name.to_string() },
        })
    }

    /// Renames the song's file in place. `None` when the song does not exist.
    pub async fn update_file_name(&self, song_id: i64, file_name: &str) -> Result<Option<Song>> {
        let mut tx = self.pool.begin().await?;

        let file_id: Option<i64> = sqlx::query_scalar("SELECT file_id FROM song WHERE id = ?")
            .bind(song_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(file_id) = file_id else {
            return Ok(None);
        };

        sqlx::query("UPDATE file SET name = ? WHERE id = ?")
            .bind(file_name)
            .bind(file_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(Song {
            id: song_id,
            file: File { id: file_id, name: file_name.to_string() },
        }))
    }

    /// Deletes the song and reaps its file row. Returns `false` when there
    /// was no such song.
    pub async fn delete_song(&self, song_id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let file_id: Option<i64> = sqlx::query_scalar("SELECT file_id FROM song WHERE id = ?")
            .bind(song_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(file_id) = file_id else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM song WHERE id = ?")
            .bind(song_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM file WHERE id = ?")
            .bind(file_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

fn song_from_row(row: &SqliteRow) -> Result<Song> {
    Ok(Song {
        id: row.try_get("id")?,
        file: File {
            id: row.try_get("file_id")?,
            name: row.try_get("file_name")?,
        },
    })
}
