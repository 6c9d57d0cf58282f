//! # credstore-cli: Credential Store CLI
//!
//! Provides the `credstore` command-line interface over a local JSON
//! snapshot vault.
//!
//! ## Subcommands
//!
//! - `credstore init`: Create the snapshot and declare the store indexes.
//! - `credstore insert`: Store a credential from a JSON file.
//! - `credstore get` / `delete`: Fetch or remove a credential by id.
//! - `credstore find`: Filter by type, issuer, and displayable flag.
//! - `credstore match`: Run a `QueryByExample` document.
//! - `credstore keygen`: Generate an invocation signer seed.
//!
//! ```bash
//! export CREDSTORE_SIGNER_SEED=$(credstore keygen --seed-only)
//! credstore insert alumni.json --displayable true
//! credstore match query.json
//! ```

pub mod config;
pub mod credential;
pub mod keygen;
pub mod session;

pub use config::{CliConfig, ConfigError};
pub use session::Session;
