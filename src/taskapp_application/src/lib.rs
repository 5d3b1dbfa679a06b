pub mod use_cases;

pub use use_cases::{
    login_user::{
        DEFAULT_LOCK_DURATION_MINUTES, LoginUserCommand, LoginUserError, LoginUserResult,
        LoginUserUseCase,
    },
    register_user::{
        RegisterUserCommand, RegisterUserError, RegisterUserResult, RegisterUserUseCase,
    },
};
