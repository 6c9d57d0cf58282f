//! # credstore CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches
//! to subcommand handlers on a single-threaded tokio runtime.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use credstore_cli::config::CliConfig;
use credstore_cli::credential::{
    run_delete, run_find, run_get, run_init, run_insert, run_match, DeleteArgs, FindArgs, GetArgs,
    InsertArgs, MatchArgs,
};
use credstore_cli::keygen::{run_keygen, KeygenArgs};

/// Verifiable credential store over a local snapshot vault.
#[derive(Parser, Debug)]
#[command(name = "credstore", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Vault snapshot file (overrides CREDSTORE_VAULT_PATH).
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    /// Vault controller and signer id (overrides CREDSTORE_CONTROLLER).
    #[arg(long, global = true)]
    controller: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the vault snapshot and declare the credential indexes.
    Init,

    /// Store a credential.
    Insert(InsertArgs),

    /// Fetch a credential by id. Exits with 2 when none is stored.
    Get(GetArgs),

    /// List credentials matching a type / issuer / displayable filter.
    Find(FindArgs),

    /// Run a QueryByExample document.
    Match(MatchArgs),

    /// Delete a credential by id. Prints whether anything was removed.
    Delete(DeleteArgs),

    /// Generate an Ed25519 invocation signer seed.
    Keygen(KeygenArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let config = CliConfig::from_env()?.with_overrides(cli.vault, cli.controller);
    tracing::debug!(?config, "resolved configuration");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            Commands::Init => run_init(&config).await,
            Commands::Insert(args) => run_insert(&args, &config).await,
            Commands::Get(args) => run_get(&args, &config).await,
            Commands::Find(args) => run_find(&args, &config).await,
            Commands::Match(args) => run_match(&args, &config).await,
            Commands::Delete(args) => run_delete(&args, &config).await,
            Commands::Keygen(args) => run_keygen(&args, &config),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_insert_with_meta_flags() {
        let cli = Cli::try_parse_from([
            "credstore",
            "insert",
            "vc.json",
            "--displayable",
            "true",
            "--doc-id",
            "z19",
        ])
        .unwrap();
        if let Commands::Insert(args) = cli.command {
            assert_eq!(args.credential, PathBuf::from("vc.json"));
            assert_eq!(args.displayable, Some(true));
            assert_eq!(args.doc_id.as_deref(), Some("z19"));
            assert!(args.meta.is_none());
        } else {
            panic!("expected insert");
        }
    }

    #[test]
    fn cli_parse_find_filters() {
        let cli = Cli::try_parse_from([
            "credstore",
            "find",
            "--type",
            "AlumniCredential",
            "--issuer",
            "did:example:u",
        ])
        .unwrap();
        if let Commands::Find(args) = cli.command {
            assert_eq!(args.credential_type.as_deref(), Some("AlumniCredential"));
            assert_eq!(args.issuer.as_deref(), Some("did:example:u"));
            assert!(args.displayable.is_none());
        } else {
            panic!("expected find");
        }
    }

    #[test]
    fn cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "credstore",
            "get",
            "urn:uuid:1",
            "--vault",
            "w.json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.vault, Some(PathBuf::from("w.json")));
        assert!(matches!(cli.command, Commands::Get(ref a) if a.id == "urn:uuid:1"));
    }

    #[test]
    fn cli_parse_match_requires_query() {
        assert!(Cli::try_parse_from(["credstore", "match"]).is_err());
    }

    #[test]
    fn cli_parse_init_and_keygen() {
        let cli = Cli::try_parse_from(["credstore", "init"]).unwrap();
        assert!(matches!(cli.command, Commands::Init));
        let cli = Cli::try_parse_from(["credstore", "keygen", "--seed-only"]).unwrap();
        assert!(matches!(cli.command, Commands::Keygen(ref a) if a.seed_only));
    }
}
