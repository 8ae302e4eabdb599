use log::info;
use sqlx::pool::PoolConnection;
use sqlx::{query, query_as, query_scalar, PgPool, Postgres};

use crate::error::Error;
use crate::impls::uploaders::local_storage::{InfoStore, UploadedFileInfo, UploadedFileInfoInsert};

/// File rows in `uploaded_files`. Rows an answer points at are kept.
pub struct SqlxInfoStore {
    pool: PgPool,
}

impl SqlxInfoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> Result<PoolConnection<Postgres>, Error> {
        Ok(self.pool.acquire().await?)
    }
}

impl InfoStore for SqlxInfoStore {
    type ID = i32;
    async fn insert(&mut self, file: UploadedFileInfoInsert) -> Result<i32, Error> {
        let mut conn = self.conn().await?;
        let id = query_scalar("INSERT INTO uploaded_files (name, extension, owner_id) VALUES ($1, $2, $3) RETURNING id")
            .bind(file.name)
            .bind(file.extension)
            .bind(file.owner_id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(id)
    }

    async fn get(&mut self, id: i32) -> Result<UploadedFileInfo<i32>, Error> {
        let mut conn = self.conn().await?;
        query_as("SELECT id, name, extension, owner_id FROM uploaded_files WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| Error::NotFound(format!("file {}", id)))
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        let mut conn = self.conn().await?;
        let in_use: i64 = query_scalar("SELECT COUNT(*) FROM answers WHERE image_id = $1").bind(id).fetch_one(&mut *conn).await?;
        if in_use > 0 {
            return Err(Error::BusinessError(format!("file {} is the image of {} answers", id, in_use)));
        }
        let res = query("DELETE FROM uploaded_files WHERE id = $1").bind(id).execute(&mut *conn).await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound(format!("file {}", id)));
        }
        info!("file row {} deleted", id);
        Ok(())
    }
}
