//! Multi-invocation flows against a snapshot file: every command opens the
//! vault afresh, so state must survive through `commit`.

use std::path::{Path, PathBuf};

use credstore_cli::config::CliConfig;
use credstore_cli::credential::{
    run_delete, run_find, run_init, run_insert, run_match, DeleteArgs, FindArgs, InsertArgs,
    MatchArgs,
};
use credstore_cli::Session;
use serde_json::{json, Value};

const SEED: &str = "1111111111111111111111111111111111111111111111111111111111111111";

fn config(dir: &Path) -> CliConfig {
    let vault = dir.join("wallet").join("vault.json");
    CliConfig::from_lookup(|var| match var {
        "CREDSTORE_SIGNER_SEED" => Some(SEED.to_string()),
        "CREDSTORE_CONTROLLER" => Some("did:example:holder".to_string()),
        _ => None,
    })
    .unwrap()
    .with_overrides(Some(vault), None)
}

fn write(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn insert_args(credential: PathBuf) -> InsertArgs {
    InsertArgs {
        credential,
        meta: None,
        displayable: None,
        doc_id: None,
    }
}

#[tokio::test]
async fn init_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    assert_eq!(run_init(&cfg).await.unwrap(), 0);
    assert!(cfg.vault_path.exists());

    let snapshot: Value =
        serde_json::from_str(&std::fs::read_to_string(&cfg.vault_path).unwrap()).unwrap();
    assert_eq!(snapshot["indexes"].as_array().unwrap().len(), 2);
    assert!(snapshot["documents"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn inserted_credentials_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());

    let vc = write(
        dir.path(),
        "alumni.json",
        &json!({"id": "urn:1", "type": ["VerifiableCredential", "AlumniCredential"], "issuer": {"id": "did:example:u"}}),
    );
    let mut args = insert_args(vc);
    args.displayable = Some(true);
    assert_eq!(run_insert(&args, &cfg).await.unwrap(), 0);

    let session = Session::open(&cfg).await.unwrap();
    assert_eq!(session.document_count(), 1);
    let record = session.store().get("urn:1").await.unwrap();
    assert_eq!(record.issuer(), Some("did:example:u"));
    assert_eq!(record.meta["displayable"], true);
}

#[tokio::test]
async fn duplicate_credential_id_is_rejected_across_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let vc = write(dir.path(), "vc.json", &json!({"id": "urn:1", "issuer": "x"}));

    run_insert(&insert_args(vc.clone()), &cfg).await.unwrap();
    let err = run_insert(&insert_args(vc), &cfg).await.unwrap_err();
    assert!(format!("{err:#}").contains("content.id"));

    let session = Session::open(&cfg).await.unwrap();
    assert_eq!(session.document_count(), 1);
}

#[tokio::test]
async fn delete_persists_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let vc = write(dir.path(), "vc.json", &json!({"id": "urn:1", "issuer": "x"}));
    run_insert(&insert_args(vc), &cfg).await.unwrap();

    let args = DeleteArgs { id: "urn:1".into() };
    assert_eq!(run_delete(&args, &cfg).await.unwrap(), 0);
    assert_eq!(Session::open(&cfg).await.unwrap().document_count(), 0);
    assert_eq!(run_delete(&args, &cfg).await.unwrap(), 0);
}

#[tokio::test]
async fn find_and_match_run_against_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    for (i, (t, issuer)) in [("A", "x"), ("B", "y"), ("A", "y")].iter().enumerate() {
        let vc = write(
            dir.path(),
            &format!("vc{i}.json"),
            &json!({"id": format!("urn:{i}"), "type": t, "issuer": issuer}),
        );
        run_insert(&insert_args(vc), &cfg).await.unwrap();
    }

    let find = FindArgs {
        credential_type: Some("A".into()),
        issuer: None,
        displayable: None,
    };
    assert_eq!(run_find(&find, &cfg).await.unwrap(), 0);

    let query = write(
        dir.path(),
        "query.json",
        &json!({
            "type": "QueryByExample",
            "credentialQuery": {"example": {"type": "A"}, "trustedIssuer": {"id": "y"}}
        }),
    );
    assert_eq!(run_match(&MatchArgs { query }, &cfg).await.unwrap(), 0);

    let session = Session::open(&cfg).await.unwrap();
    let ids: Vec<String> = session
        .store()
        .match_with(
            &json!({
                "type": "QueryByExample",
                "credentialQuery": {"example": {"type": "A"}, "trustedIssuer": {"id": "y"}}
            }),
            |r| r.content["id"].as_str().unwrap_or_default().to_string(),
        )
        .await
        .unwrap();
    assert_eq!(ids, vec!["urn:2"]);
}

#[tokio::test]
async fn unsupported_query_type_fails_the_command() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let query = write(
        dir.path(),
        "query.json",
        &json!({"type": "DIDAuth", "credentialQuery": {"example": {"type": "A"}}}),
    );
    let err = run_match(&MatchArgs { query }, &cfg).await.unwrap_err();
    assert!(format!("{err:#}").contains("DIDAuth"));
}
