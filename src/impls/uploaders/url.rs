use crate::core::uploader::FileUrlGenerator;

/// Route under which uploaded files are served.
pub const FILES_ROUTE: &str = "/files";

#[derive(Debug, Clone)]
pub struct PublicUrl {
    base: String,
}

impl PublicUrl {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_owned(),
        }
    }
}

impl FileUrlGenerator for PublicUrl {
    fn generate_absolute(&self, name: &str) -> String {
        format!("{}{}/{}", self.base, FILES_ROUTE, name)
    }
}
