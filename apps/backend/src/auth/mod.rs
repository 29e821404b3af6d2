pub mod authorize;
pub mod claims;
pub mod cookie;
pub mod jwt;
