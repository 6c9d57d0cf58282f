//! # Credential Subcommands
//!
//! `init`, `insert`, `get`, `find`, `match`, and `delete` over the snapshot
//! vault. Input documents are read from JSON files; results are printed to
//! stdout as pretty JSON.
//!
//! Exit codes: `0` on success, `2` when `get` finds nothing. Errors are
//! returned to `main`, which reports them and exits with `1`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use credstore::{FilterSpec, StoreError};
use serde_json::{Map, Value};

use crate::config::CliConfig;
use crate::session::Session;

/// Exit code for a `get` that matched no credential.
pub const EXIT_NOT_FOUND: u8 = 2;

/// Arguments for `credstore insert`.
#[derive(Args, Debug)]
pub struct InsertArgs {
    /// Path to the credential JSON document.
    pub credential: PathBuf,
    /// Path to a JSON object of extra metadata (e.g. `{"displayable": true}`).
    #[arg(long)]
    pub meta: Option<PathBuf>,
    /// Shortcut for setting `meta.displayable`.
    #[arg(long)]
    pub displayable: Option<bool>,
    /// Vault document id to use instead of a generated one.
    #[arg(long)]
    pub doc_id: Option<String>,
}

/// Arguments for `credstore get`.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Credential identifier (`content.id`).
    pub id: String,
}

/// Arguments for `credstore find`.
#[derive(Args, Debug)]
pub struct FindArgs {
    /// Credential type to match.
    #[arg(long = "type")]
    pub credential_type: Option<String>,
    /// Issuer id to match.
    #[arg(long)]
    pub issuer: Option<String>,
    /// Displayable flag to match.
    #[arg(long)]
    pub displayable: Option<bool>,
}

/// Arguments for `credstore match`.
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Path to a `QueryByExample` JSON document.
    pub query: PathBuf,
}

/// Arguments for `credstore delete`.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Credential identifier (`content.id`).
    pub id: String,
}

/// Create the snapshot file with the store indexes declared.
pub async fn run_init(config: &CliConfig) -> Result<u8> {
    let session = Session::open(config).await?;
    session.commit()?;
    println!(
        "OK: vault ready at {} ({} credentials)",
        session.path().display(),
        session.document_count()
    );
    Ok(0)
}

pub async fn run_insert(args: &InsertArgs, config: &CliConfig) -> Result<u8> {
    let credential = read_json(&args.credential)?;
    let mut meta = match &args.meta {
        Some(path) => match read_json(path)? {
            Value::Object(map) => Some(map),
            other => bail!(
                "metadata in {} must be a JSON object, found {}",
                path.display(),
                kind(&other)
            ),
        },
        None => None,
    };
    if let Some(displayable) = args.displayable {
        meta.get_or_insert_with(Map::new)
            .insert("displayable".to_string(), Value::Bool(displayable));
    }

    let session = Session::open(config).await?;
    let record = session
        .store()
        .insert(credential, meta, args.doc_id.clone())
        .await
        .with_context(|| format!("inserting {}", args.credential.display()))?;
    session.commit()?;
    print_json(&record)?;
    Ok(0)
}

pub async fn run_get(args: &GetArgs, config: &CliConfig) -> Result<u8> {
    let session = Session::open(config).await?;
    match session.store().get(&args.id).await {
        Ok(record) => {
            print_json(&record)?;
            Ok(0)
        }
        Err(StoreError::NotFound { id }) => {
            tracing::warn!(%id, "credential not found");
            Ok(EXIT_NOT_FOUND)
        }
        Err(e) => Err(e).with_context(|| format!("fetching {}", args.id)),
    }
}

pub async fn run_find(args: &FindArgs, config: &CliConfig) -> Result<u8> {
    let filter = FilterSpec {
        credential_type: args.credential_type.clone(),
        issuer: args.issuer.clone(),
        displayable: args.displayable,
    };
    let session = Session::open(config).await?;
    let records = session.store().find(filter).await.context("finding credentials")?;
    print_json(&records)?;
    Ok(0)
}

pub async fn run_match(args: &MatchArgs, config: &CliConfig) -> Result<u8> {
    let query = read_json(&args.query)?;
    let session = Session::open(config).await?;
    let records = session
        .store()
        .match_query(&query)
        .await
        .with_context(|| format!("matching {}", args.query.display()))?;
    print_json(&records)?;
    Ok(0)
}

pub async fn run_delete(args: &DeleteArgs, config: &CliConfig) -> Result<u8> {
    let session = Session::open(config).await?;
    let deleted = session
        .store()
        .delete(&args.id)
        .await
        .with_context(|| format!("deleting {}", args.id))?;
    if deleted {
        session.commit()?;
    }
    println!("{deleted}");
    Ok(0)
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {} as JSON", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(dir: &Path) -> CliConfig {
        let vault = dir.join("vault.json");
        CliConfig::from_lookup(|_| None)
            .unwrap()
            .with_overrides(Some(vault), None)
    }

    fn write(dir: &Path, name: &str, value: &Value) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    #[tokio::test]
    async fn init_creates_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        assert_eq!(run_init(&cfg).await.unwrap(), 0);
        assert!(cfg.vault_path.exists());
    }

    #[tokio::test]
    async fn insert_rejects_non_object_meta() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        let args = InsertArgs {
            credential: write(dir.path(), "vc.json", &json!({"id": "urn:1", "issuer": "x"})),
            meta: Some(write(dir.path(), "meta.json", &json!([1, 2]))),
            displayable: None,
            doc_id: None,
        };
        let err = run_insert(&args, &cfg).await.unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));
        assert!(!cfg.vault_path.exists());
    }

    #[tokio::test]
    async fn get_missing_exits_with_not_found_code() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        let code = run_get(&GetArgs { id: "urn:none".into() }, &cfg).await.unwrap();
        assert_eq!(code, EXIT_NOT_FOUND);
    }

    #[tokio::test]
    async fn unreadable_credential_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        let args = InsertArgs {
            credential: dir.path().join("missing.json"),
            meta: None,
            displayable: None,
            doc_id: None,
        };
        let err = run_insert(&args, &cfg).await.unwrap_err();
        assert!(format!("{err:#}").contains("reading"));
    }

    #[test]
    fn kind_names_json_shapes() {
        assert_eq!(kind(&json!([])), "an array");
        assert_eq!(kind(&json!(null)), "null");
    }
}
