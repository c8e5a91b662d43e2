//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, constant-time comparison)
//! - Password hashing (Argon2id)
//! - Cookie management
//! - Image upload storage (type-partitioned directories on disk)

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod upload;
