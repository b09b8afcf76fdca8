//! Use-case services over the address book.
//!
//! # Responsibility
//! - Provide stable entry points for the interactive shell.
//! - Keep persistence behind the repository contract.

pub mod book_service;
