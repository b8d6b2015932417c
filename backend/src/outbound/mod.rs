//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: in-process repositories for development and tests
//! - **credentials**: argon2 password hashing and random session tokens

pub mod credentials;
pub mod memory;
pub mod persistence;
