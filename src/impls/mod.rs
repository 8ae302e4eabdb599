pub mod tokener;
pub mod uploaders;
