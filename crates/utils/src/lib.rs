pub mod assets;
pub mod jwt;
pub mod response;
pub mod sentry;
