//! Value objects for the user domain

pub mod email;
pub mod phone;
