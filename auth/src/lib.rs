//! Authentication utilities library
//!
//! Provides the credential building blocks used by the passport service:
//! - Password hashing (Argon2id, tunable cost)
//! - JWT access/refresh token signing and validation
//! - Token pair issuance
//!
//! Services define their own authentication traits and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::{Authenticator, SigningConfig, TokenClaims, TokenKind};
//!
//! struct Settings;
//!
//! impl SigningConfig for Settings {
//!     fn secret_key(&self) -> &[u8] {
//!         b"secret_key_at_least_32_bytes_long!"
//!     }
//!     fn access_expires_in(&self) -> i64 {
//!         900
//!     }
//!     fn refresh_expires_in(&self) -> i64 {
//!         86_400
//!     }
//! }
//!
//! let auth = Authenticator::new(Settings);
//! let pair = auth.issue_pair(&"user123", chrono::Utc::now()).unwrap();
//!
//! let decoded: TokenClaims<String> = auth
//!     .validate_token(&pair.access_token, TokenKind::Access)
//!     .unwrap();
//! assert_eq!(decoded.claims, "user123");
//! assert_eq!(decoded.sub, "access-token");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::JwtError;
pub use jwt::SigningConfig;
pub use jwt::TokenClaims;
pub use jwt::TokenKind;
pub use jwt::TokenSigner;
pub use password::PasswordError;
pub use password::PasswordHasher;
