//! graphkit CLI library.
//!
//! Configuration, output rendering and subcommand implementations behind
//! the `graphkit` binary.

pub mod colors;
pub mod commands;
pub mod config;
pub mod error;
pub mod observer;
