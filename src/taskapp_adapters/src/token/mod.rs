pub mod jwt_token_generator;

pub use jwt_token_generator::{Claims, JwtTokenConfig, JwtTokenGenerator, TokenValidationError};
