use chrono::{Duration, Utc};
use hex::ToHex;
use sha2::{Digest, Sha256};

use crate::core::ports::repository::{Store, UserCommon};
use crate::core::tokener::{Claim, Tokener};
use crate::error::Error;

pub fn hash_password(pass: &str, slt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pass);
    hasher.update(slt);
    hasher.finalize().encode_hex()
}

/// Checks an editor's credentials and issues a token valid for 30 days.
pub async fn login<S, T>(store: &mut S, tokener: &T, username: &str, password: &str) -> Result<String, Error>
where
    S: Store,
    T: Tokener<Claim>,
{
    let user = UserCommon::get_by_username(store, username).await?.ok_or(Error::Unauthorized)?;
    if hash_password(password, &user.salt) != user.password {
        return Err(Error::Unauthorized);
    }
    let claim = Claim {
        user: user.id.to_string(),
        exp: (Utc::now() + Duration::days(30)).timestamp(),
    };
    tokener.gen_token(&claim)
}
