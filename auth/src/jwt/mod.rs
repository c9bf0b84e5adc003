pub mod claims;
pub mod errors;
pub mod signer;

pub use claims::TokenClaims;
pub use claims::TokenKind;
pub use claims::AUDIENCE;
pub use claims::ISSUER;
pub use errors::JwtError;
pub use signer::SigningConfig;
pub use signer::TokenSigner;
