//! Persistence layer for the address book.
//!
//! # Responsibility
//! - Define the snapshot repository contract and its SQLite implementation.

pub mod book_repo;
