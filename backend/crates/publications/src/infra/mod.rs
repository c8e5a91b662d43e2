//! Infrastructure layer - persistence implementations

pub mod postgres;
