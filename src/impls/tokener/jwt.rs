use crate::core::tokener::{Payload, Tokener};
use crate::error::Error;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

pub struct JWT {
    secret: Vec<u8>,
}

impl JWT {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl<P> Tokener<P> for JWT
where
    P: Payload,
{
    fn gen_token(&self, payload: &P) -> Result<String, Error> {
        let header = Header::new(Algorithm::HS256);
        let key = EncodingKey::from_secret(&self.secret);
        let token = encode(&header, payload, &key)?;
        Ok(token)
    }
    fn verify_token(&self, token: &str) -> Result<P, Error> {
        let key = DecodingKey::from_secret(&self.secret);
        let validation = Validation::new(Algorithm::HS256);
        let payload = decode(token, &key, &validation)?;
        Ok(payload.claims)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::tokener::Claim;
    use chrono::{Duration, Utc};

    fn claim(user: &str) -> Claim {
        Claim {
            user: user.into(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        }
    }

    #[test]
    fn test_gen_and_verify_token() {
        let jwt = JWT::new(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 0]);
        let claim = claim("12");
        let token = jwt.gen_token(&claim).unwrap();
        let c: Claim = jwt.verify_token(&token).unwrap();
        assert_eq!(claim.user, c.user);
        assert_eq!(c.user(), "12");
    }

    #[test]
    fn test_wrong_secret() {
        let token = JWT::new(b"editor".to_vec()).gen_token(&claim("1")).unwrap();
        let res: Result<Claim, Error> = JWT::new(b"other".to_vec()).verify_token(&token);
        assert!(matches!(res, Err(Error::JWTError(_))));
    }

    #[test]
    fn test_expired_token() {
        let jwt = JWT::new(b"editor".to_vec());
        let expired = Claim {
            user: "1".into(),
            exp: (Utc::now() - Duration::days(1)).timestamp(),
        };
        let token = jwt.gen_token(&expired).unwrap();
        assert!(<JWT as Tokener<Claim>>::verify_token(&jwt, &token).is_err());
    }
}
