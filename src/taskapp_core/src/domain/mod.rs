pub mod email;
pub mod password_hash;
pub mod role;
pub mod status;
pub mod user;
pub mod user_id;
