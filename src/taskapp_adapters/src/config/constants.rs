pub mod env {
    pub const ENV_PREFIX: &str = "TASKAPP";
    pub const ENV_SEPARATOR: &str = "__";
    pub const JWT_SECRET_ENV_VAR: &str = "TASKAPP__JWT__SECRET";
    pub const CONFIG_FILE_ENV_VAR: &str = "TASKAPP_CONFIG_FILE";
}

pub const CONFIG_FILE_NAME: &str = "taskapp.json";

pub mod defaults {
    pub const JWT_TIME_TO_LIVE_SECONDS: i64 = 600;
    pub const JWT_ISSUER: &str = "taskapp";
    pub const LOCK_DURATION_SECONDS: i64 = 900;
    pub const ARGON2_MEMORY_KIB: u32 = 15000;
    pub const ARGON2_ITERATIONS: u32 = 2;
    pub const ARGON2_PARALLELISM: u32 = 1;
}
