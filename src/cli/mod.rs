//! CLI module for the user registration service
//!
//! - `serve`: run the HTTP server
//! - `migrate`: apply PostgreSQL schema migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// User registration service
#[derive(Parser)]
#[command(name = "user-registration")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(serve::ServeArgs),

    /// Apply pending database migrations
    Migrate,
}
