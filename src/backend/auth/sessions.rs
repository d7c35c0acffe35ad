/**
 * Session Tokens
 *
 * Stateless JWT sessions. A token carries the account id and email;
 * presence and chat identity are established separately over the
 * websocket, so nothing here touches the registry.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime: 30 days
const TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id, stringified UUID
    pub sub: String,
    /// Email at issue time
    pub email: String,
    /// Expiration (Unix timestamp)
    pub exp: u64,
    /// Issued at (Unix timestamp)
    pub iat: u64,
}

impl Claims {
    fn new(user_id: Uuid, email: String) -> Self {
        let now = Utc::now().timestamp().max(0) as u64;
        Self {
            sub: user_id.to_string(),
            email,
            exp: now + TOKEN_TTL_SECS as u64,
            iat: now,
        }
    }

    /// The account id the token was issued for
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|err| {
        eprintln!("Missing JWT_SECRET. Error: {}", err);
        "your-secret-key-change-in-production".to_string()
    })
}

/// Issue a session token for an account
pub fn create_token(user_id: Uuid, email: String) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::new(user_id, email);
    let key = EncodingKey::from_secret(jwt_secret().as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Verify a session token's signature and expiry, returning its claims
pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(jwt_secret().as_ref());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}
