//! `credstore keygen`: generate an invocation signer seed.
//!
//! Prints the hex seed to export as `CREDSTORE_SIGNER_SEED` together with
//! the matching public key.

use anyhow::Result;
use clap::Args;
use credstore_edv::Ed25519Signer;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::config::CliConfig;

/// Arguments for `credstore keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Print only the seed hex.
    #[arg(long)]
    pub seed_only: bool,
}

pub fn run_keygen(args: &KeygenArgs, config: &CliConfig) -> Result<u8> {
    let (seed_hex, signer) = generate(&config.controller);
    if args.seed_only {
        println!("{}", seed_hex.as_str());
    } else {
        let out = serde_json::json!({
            "id": config.controller,
            "seed": seed_hex.as_str(),
            "publicKey": signer.public_key_hex(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(0)
}

fn generate(id: &str) -> (Zeroizing<String>, Ed25519Signer) {
    let mut seed = Zeroizing::new([0u8; 32]);
    rand::rngs::OsRng.fill_bytes(&mut *seed);
    let signer = Ed25519Signer::from_seed(id, &seed);
    (Zeroizing::new(hex::encode(&*seed)), signer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_seed_reproduces_the_signer() {
        let (seed_hex, signer) = generate("did:example:holder");
        assert_eq!(seed_hex.len(), 64);
        let again = Ed25519Signer::from_seed_hex("did:example:holder", &seed_hex).unwrap();
        assert_eq!(again.public_key_hex(), signer.public_key_hex());
    }

    #[test]
    fn seeds_differ_between_runs() {
        let (a, _) = generate("x");
        let (b, _) = generate("x");
        assert_ne!(a.as_str(), b.as_str());
    }
}
