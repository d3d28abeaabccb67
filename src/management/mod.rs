mod auth;

pub use auth::TOKEN_EXPIRY_MARGIN_SECS;
pub use auth::Token;
pub use auth::TokenCache;
