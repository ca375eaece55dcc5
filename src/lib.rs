//! Bookshelf application library
//!
//! Hosts the book catalogue module and the bootstrap used by both the
//! `bookshelf-app` binary and the `bookshelf` CLI.

pub mod bootstrap;
pub mod modules;

pub use bootstrap::{migrate, registry, serve};
