use anyhow::Result;
use sqlx::sqlite::SqlitePool;

use crate::model::File;

pub struct FileRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FileRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_file(&self, name: &str) -> Result<File> {
        let id = sqlx::query("INSERT INTO file (name) VALUES (?)")
            .bind(name)
            .execute(self.pool)
            .await?
            .last_insert_rowid();

        Ok(File { id, name: name.to_string() })
    }

    #[cfg(test)]
    pub async fn get_file_by_id(&self, file_id: i64) -> Result<Option<File>> {
        use sqlx::Row;

        let row = sqlx::query("SELECT id, name FROM file WHERE id = ?")
            .bind(file_id)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(File {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
            })),
            None => Ok(None),
        }
    }
}
