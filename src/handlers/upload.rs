use actix_multipart::Multipart;
use actix_web::web::{Data, Json, Path};
use actix_web::HttpResponse;
use bytes::BytesMut;
use futures_util::TryStreamExt;
use serde::Serialize;
use sqlx::PgPool;

use crate::config::Config;
use crate::context::UserInfo;
use crate::core::models::{UploadedFile, UploadedFileCreate};
use crate::core::uploader::{FileUrlGenerator, Uploader};
use crate::error::Error;
use crate::impls::uploaders::info_store::SqlxInfoStore;
use crate::impls::uploaders::local_storage::{LocalStorage, MAX_FILE_SIZE};
use crate::impls::uploaders::url::PublicUrl;
use crate::response::Notice;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub file: UploadedFile<i32>,
    pub url: String,
}

fn storage(config: &Config, pool: &PgPool) -> LocalStorage<SqlxInfoStore> {
    LocalStorage::new(config.upload_path.clone(), SqlxInfoStore::new(pool.clone()))
}

fn with_url(config: &Config, file: UploadedFile<i32>) -> UploadResponse {
    let url = PublicUrl::new(&config.public_url).generate_absolute(&file.name);
    UploadResponse { file, url }
}

fn extension_of(filename: &str) -> Result<String, Error> {
    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Ok(ext.to_owned()),
        _ => Err(Error::BusinessError(format!("file {} has no extension", filename))),
    }
}

/// Buffers one multipart chunk, refusing to grow past the image size cap.
fn append_chunk(content: &mut BytesMut, chunk: &[u8]) -> Result<(), Error> {
    if content.len() + chunk.len() > MAX_FILE_SIZE {
        return Err(Error::BusinessError(format!("file exceeds the {} bytes limit", MAX_FILE_SIZE)));
    }
    content.extend_from_slice(chunk);
    Ok(())
}

/// Stores every file field of the multipart body as an answer image.
pub async fn create(user: UserInfo, mut payload: Multipart, config: Data<Config>, pool: Data<PgPool>) -> Result<HttpResponse, Error> {
    let mut uploader = storage(&config, &pool);
    let mut files = Vec::new();
    while let Some(mut field) = payload.try_next().await? {
        let Some(filename) = field.content_disposition().get_filename().map(str::to_owned) else {
            continue;
        };
        let extension = extension_of(&filename)?;
        let mut content = BytesMut::new();
        while let Some(chunk) = field.try_next().await? {
            append_chunk(&mut content, &chunk)?;
        }
        let file = uploader
            .put(UploadedFileCreate {
                extension,
                content: content.to_vec(),
                owner_id: user.id,
            })
            .await?;
        files.push(with_url(&config, file));
    }
    if files.is_empty() {
        return Err(Error::BusinessError("no file uploaded".into()));
    }
    Ok(HttpResponse::Created().json(files))
}

pub async fn detail(_: UserInfo, file_id: Path<(i32,)>, config: Data<Config>, pool: Data<PgPool>) -> Result<Json<UploadResponse>, Error> {
    let file = storage(&config, &pool).get(file_id.into_inner().0).await?;
    Ok(Json(with_url(&config, file)))
}

pub async fn delete(_: UserInfo, file_id: Path<(i32,)>, config: Data<Config>, pool: Data<PgPool>) -> Result<Json<Notice>, Error> {
    let id = file_id.into_inner().0;
    storage(&config, &pool).delete(id).await?;
    Ok(Json(Notice::new(format!("file {} deleted", id))))
}
