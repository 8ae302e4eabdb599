use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile<I> {
    pub id: I,
    pub name: String,
    pub extension: String,
    pub owner_id: i32,
}

#[derive(Debug)]
pub struct UploadedFileCreate {
    pub extension: String,
    pub content: Vec<u8>,
    pub owner_id: i32,
}
