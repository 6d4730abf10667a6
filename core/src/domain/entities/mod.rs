pub mod identity;
pub mod token;

pub use identity::Identity;
pub use token::{Audience, Claims, TokenClaims, AUTHORITIES_CLAIM};
