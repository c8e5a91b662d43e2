//! Application layer - use cases

pub mod config;
pub mod register;
pub mod sign_in;
pub mod token;
pub mod update_profile;

pub use register::{RegisterInput, RegisterUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use update_profile::{UpdateProfileInput, UpdateProfileUseCase};
