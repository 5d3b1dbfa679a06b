pub mod constants;
pub mod settings;

pub use settings::{AccountSettings, Argon2Settings, JwtSettings, LoginSettings};
