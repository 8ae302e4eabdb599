use serde::Deserialize;

/// Owner recorded on records created without an authenticated user.
pub const ANONYMOUS_OWNER: i32 = 0;

pub fn owner_or_anonymous(uid: Option<i32>) -> i32 {
    match uid {
        Some(id) if id != ANONYMOUS_OWNER => id,
        _ => ANONYMOUS_OWNER,
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: Option<i64>,
}

impl Pagination {
    pub fn new(limit: i64, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    /// None when `size` is not positive or the offset overflows.
    pub fn page(page: i64, size: i64) -> Option<Self> {
        if size < 1 {
            return None;
        }
        let offset = (page.max(1) - 1).checked_mul(size)?;
        Some(Self::new(size, Some(offset)))
    }
}
