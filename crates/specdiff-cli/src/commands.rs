use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use specdiff_sdk::loader::{parse, Resolver};
use specdiff_sdk::{compare_documents, CompareConfig, Format};
use specdiff_server::{ServerConfig, SpecdiffServer};

use crate::cli::*;
use crate::render::render_comparison;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args),
        Command::Parse(args) => cmd_parse(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Serve(args) => cmd_serve(args),
    }
}

/// Read a document and settle its format: the explicit flag wins, then the
/// file extension, then JSON.
fn read_document(path: &Path, format: Option<Format>) -> anyhow::Result<(String, Format)> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let format = format
        .or_else(|| Format::from_path(&path.to_string_lossy()))
        .unwrap_or_default();
    Ok((content, format))
}

fn load_compare_config(path: Option<&Path>) -> anyhow::Result<CompareConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(CompareConfig::from_toml_str(&text)?)
        }
        None => Ok(CompareConfig::default()),
    }
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<()> {
    let mut config = load_compare_config(args.config.as_deref())?;
    if args.resolve_refs {
        config.resolve_refs = true;
    }

    let (before, before_format) = read_document(&args.before, args.format)?;
    let (after, after_format) = read_document(&args.after, args.format)?;
    if before_format != after_format {
        anyhow::bail!(
            "{} is {} but {} is {}; pass --format to compare them as one syntax",
            args.before.display(),
            before_format,
            args.after.display(),
            after_format
        );
    }

    tracing::debug!(
        before = %args.before.display(),
        after = %args.after.display(),
        format = %before_format,
        resolve_refs = config.resolve_refs,
        "comparing documents"
    );
    let comparison = compare_documents(&before, &after, before_format, &config)?;
    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Text => {
            if !comparison.has_changes() {
                println!("{} No differences.", "✓".green().bold());
            }
            print!("{}", render_comparison(&comparison, args.all));
        }
    }
    Ok(())
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<()> {
    let (content, format) = read_document(&args.file, args.format)?;
    let tree = parse(&content, format)?;
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let config = load_compare_config(args.config.as_deref())?;
    let (content, format) = read_document(&args.file, args.format)?;
    let tree = parse(&content, format)?;
    let resolution = Resolver::new(config.resolve).resolve(&tree);

    match args.output {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "value": resolution.value,
                "warnings": resolution.warnings,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(&resolution.value)?);
            for warning in &resolution.warnings {
                eprintln!("{} {}", "warning:".yellow().bold(), warning);
            }
        }
    }
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ServerConfig::from_toml_str(&text)?
        }
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    println!("specdiff server on {}", config.bind_addr.to_string().bold());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(SpecdiffServer::new(config).serve())?;
    Ok(())
}
