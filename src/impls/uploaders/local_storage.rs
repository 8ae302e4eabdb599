use std::{
    fs::{remove_file, write},
    io::Cursor,
    path::Path,
};

use crate::core::models::{UploadedFile, UploadedFileCreate};
use crate::core::uploader::Uploader;
use crate::error::Error;
use image::io::Reader as ImageReader;
use log::info;
use sqlx::FromRow;
use uuid::Uuid;

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
pub const MAX_FILE_SIZE: usize = 2 * 1024 * 1024;
pub const MAX_RESOLUTION: (u32, u32) = (2048, 2048);

#[derive(Debug, Clone, FromRow)]
pub struct UploadedFileInfo<I> {
    pub id: I,
    pub name: String,
    pub extension: String,
    pub owner_id: i32,
}

pub struct UploadedFileInfoInsert {
    pub name: String,
    pub extension: String,
    pub owner_id: i32,
}

pub trait InfoStore {
    type ID: Clone;
    async fn insert(&mut self, info: UploadedFileInfoInsert) -> Result<Self::ID, Error>;
    async fn get(&mut self, id: Self::ID) -> Result<UploadedFileInfo<Self::ID>, Error>;
    async fn delete(&mut self, id: Self::ID) -> Result<(), Error>;
}

/// Checks an answer image against the extension allow-list, the size cap and
/// the resolution cap. Returns the normalized extension.
pub fn validate_image(file: &UploadedFileCreate) -> Result<String, Error> {
    let extension = file.extension.trim_start_matches('.').to_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(Error::BusinessError(format!("only {} files are allowed", ALLOWED_EXTENSIONS.join(", "))));
    }
    if file.content.len() > MAX_FILE_SIZE {
        return Err(Error::BusinessError(format!("file exceeds the {} bytes limit", MAX_FILE_SIZE)));
    }
    let (width, height) = ImageReader::new(Cursor::new(&file.content)).with_guessed_format()?.into_dimensions()?;
    if width > MAX_RESOLUTION.0 || height > MAX_RESOLUTION.1 {
        return Err(Error::BusinessError(format!(
            "image is {}x{}, the maximum is {}x{}",
            width, height, MAX_RESOLUTION.0, MAX_RESOLUTION.1
        )));
    }
    Ok(extension)
}

pub struct LocalStorage<S: InfoStore> {
    path: String,
    store: S,
}

impl<S: InfoStore> LocalStorage<S> {
    pub fn new(path: String, store: S) -> Self {
        Self { path, store }
    }
}

impl<S: InfoStore> Uploader for LocalStorage<S> {
    type ID = S::ID;
    async fn put(&mut self, file: UploadedFileCreate) -> Result<UploadedFile<Self::ID>, Error> {
        let extension = validate_image(&file)?;
        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        write(Path::new(&self.path).join(&filename), &file.content)?;
        let id = self
            .store
            .insert(UploadedFileInfoInsert {
                name: filename.clone(),
                extension: extension.clone(),
                owner_id: file.owner_id,
            })
            .await?;
        info!("stored image {}", filename);
        Ok(UploadedFile {
            id,
            name: filename,
            extension,
            owner_id: file.owner_id,
        })
    }

    async fn get(&mut self, id: Self::ID) -> Result<UploadedFile<Self::ID>, Error> {
        let info = self.store.get(id).await?;
        Ok(UploadedFile {
            id: info.id,
            name: info.name,
            extension: info.extension,
            owner_id: info.owner_id,
        })
    }

    async fn delete(&mut self, id: Self::ID) -> Result<(), Error> {
        let info = self.store.get(id).await?;
        self.store.delete(info.id.clone()).await?;
        remove_file(Path::new(&self.path).join(&info.name))?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, RgbImage};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryInfoStore {
        next_id: i32,
        infos: HashMap<i32, UploadedFileInfo<i32>>,
        in_use: Vec<i32>,
    }

    impl InfoStore for MemoryInfoStore {
        type ID = i32;
        async fn insert(&mut self, info: UploadedFileInfoInsert) -> Result<i32, Error> {
            self.next_id += 1;
            self.infos.insert(
                self.next_id,
                UploadedFileInfo {
                    id: self.next_id,
                    name: info.name,
                    extension: info.extension,
                    owner_id: info.owner_id,
                },
            );
            Ok(self.next_id)
        }

        async fn get(&mut self, id: i32) -> Result<UploadedFileInfo<i32>, Error> {
            self.infos.get(&id).cloned().ok_or_else(|| Error::NotFound(format!("file {}", id)))
        }

        async fn delete(&mut self, id: i32) -> Result<(), Error> {
            if self.in_use.contains(&id) {
                return Err(Error::BusinessError(format!("file {} is in use", id)));
            }
            self.infos.remove(&id).map(|_| ()).ok_or_else(|| Error::NotFound(format!("file {}", id)))
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::new(width, height)).write_to(&mut buf, ImageOutputFormat::Png).unwrap();
        buf.into_inner()
    }

    fn upload(extension: &str, content: Vec<u8>) -> UploadedFileCreate {
        UploadedFileCreate {
            extension: extension.into(),
            content,
            owner_id: 0,
        }
    }

    #[test]
    fn test_validate_image() {
        assert_eq!(validate_image(&upload("PNG", png(16, 16))).unwrap(), "png");
        assert!(matches!(validate_image(&upload("gif", png(16, 16))), Err(Error::BusinessError(_))));
        assert!(matches!(validate_image(&upload("png", png(2049, 10))), Err(Error::BusinessError(_))));
        assert!(matches!(validate_image(&upload("png", vec![0; MAX_FILE_SIZE + 1])), Err(Error::BusinessError(_))));
        assert!(validate_image(&upload("jpg", b"not an image".to_vec())).is_err());
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let dir = std::env::temp_dir().join(Uuid::new_v4().to_string());
        std::fs::create_dir_all(&dir).unwrap();
        let mut storage = LocalStorage::new(dir.to_string_lossy().into_owned(), MemoryInfoStore::default());
        let stored = storage.put(upload("png", png(4, 4))).await.unwrap();
        assert!(stored.name.ends_with(".png"));
        assert!(dir.join(&stored.name).exists());

        let fetched = storage.get(stored.id).await.unwrap();
        assert_eq!(fetched.name, stored.name);

        storage.delete(stored.id).await.unwrap();
        assert!(!dir.join(&stored.name).exists());
        assert!(matches!(storage.get(stored.id).await, Err(Error::NotFound(_))));
        assert!(matches!(storage.delete(stored.id).await, Err(Error::NotFound(_))));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_image_in_use_is_kept() {
        let dir = std::env::temp_dir().join(Uuid::new_v4().to_string());
        std::fs::create_dir_all(&dir).unwrap();
        let mut storage = LocalStorage::new(dir.to_string_lossy().into_owned(), MemoryInfoStore::default());
        let stored = storage.put(upload("png", png(4, 4))).await.unwrap();
        storage.store.in_use.push(stored.id);
        assert!(matches!(storage.delete(stored.id).await, Err(Error::BusinessError(_))));
        assert!(dir.join(&stored.name).exists());
        assert_eq!(storage.get(stored.id).await.unwrap().name, stored.name);
        std::fs::remove_dir_all(dir).unwrap();
    }
}
