//! Domain value objects

pub mod category;
pub mod kind;
pub mod status;

pub use category::Category;
pub use kind::PublicationType;
pub use status::PublicationStatus;
