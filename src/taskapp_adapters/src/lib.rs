pub mod clock;
pub mod config;
pub mod hashing;
pub mod persistence;
pub mod telemetry;
pub mod token;

pub use clock::{FixedClock, SystemClock};
pub use config::{AccountSettings, Argon2Settings, JwtSettings, LoginSettings};
pub use hashing::Argon2PasswordHasher;
pub use persistence::HashMapUserRepository;
pub use token::{Claims, JwtTokenConfig, JwtTokenGenerator, TokenValidationError};
