//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `repofetch` command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific options, derived using
//!   `clap`.
//! - An `execute` function that takes the parsed `Args` together with the run
//!   `Config` and performs the command by calling into the `repofetch`
//!   library.

pub mod install;
pub mod update;
