//! Application layer - use cases

pub mod create;
pub mod get;
pub mod list;
pub mod update;

pub use create::{CreatePublicationInput, CreatePublicationUseCase};
pub use get::GetPublicationUseCase;
pub use list::{ListPublicationsInput, ListPublicationsUseCase, PublicationPage};
pub use update::{UpdatePublicationInput, UpdatePublicationUseCase};
