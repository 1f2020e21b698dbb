use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use specdiff_sdk::Format;

#[derive(Parser)]
#[command(
    name = "specdiff",
    about = "Structural diff for JSON, YAML, and OpenAPI documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two documents
    Diff(DiffArgs),
    /// Parse a document and print it as JSON
    Parse(ParseArgs),
    /// Expand internal $ref pointers and print the result
    Resolve(ResolveArgs),
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub before: PathBuf,
    pub after: PathBuf,
    /// Document syntax (json, yaml); guessed from the extension if omitted
    #[arg(long)]
    pub format: Option<Format>,
    /// Expand internal $ref pointers before comparing
    #[arg(long)]
    pub resolve_refs: bool,
    /// TOML file with comparison settings
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Also list unchanged values
    #[arg(long)]
    pub all: bool,
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Args)]
pub struct ParseArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub format: Option<Format>,
}

#[derive(Args)]
pub struct ResolveArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub format: Option<Format>,
    /// TOML file with comparison settings; only `[resolve]` is used
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on, overriding the config file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML file with server settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}
