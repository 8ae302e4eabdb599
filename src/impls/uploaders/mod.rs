pub mod info_store;
pub mod local_storage;
pub mod url;
