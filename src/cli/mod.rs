// src/cli/mod.rs
use clap::Parser;

pub mod commands;
pub mod handlers;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(author, version, about = "Client-side security toolkit: ciphers, digests and password tools", long_about = None)]
pub struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to execute (starts the API server when omitted)
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}
