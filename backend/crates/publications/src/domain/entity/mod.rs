//! Domain entities

pub mod publication;
