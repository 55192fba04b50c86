//! Development seed records
//!
//! Fills the in-memory store from a JSON array when no database is configured.
//! Seeds carry onboarding facts only; every seeded helper starts undecided.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::aggregate::HelperValidation;

/// One helper as written in the seed file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HelperSeed {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(default)]
    pub email_confirmed: bool,
    #[serde(default)]
    pub credentials_submitted: bool,
    #[serde(default)]
    pub background_check_submitted: bool,
}

impl From<HelperSeed> for HelperValidation {
    fn from(seed: HelperSeed) -> Self {
        HelperValidation::new(seed.email, seed.firstname, seed.lastname)
            .with_email_confirmed(seed.email_confirmed)
            .with_submissions(seed.credentials_submitted, seed.background_check_submitted)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate helper in seed data: {0}")]
    Duplicate(String),
}

/// Parse a JSON array of seeds
pub fn parse_seed(json: &str) -> Result<Vec<HelperValidation>, SeedError> {
    let seeds: Vec<HelperSeed> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(seeds.len());
    for seed in seeds {
        if !seen.insert(seed.email.clone()) {
            return Err(SeedError::Duplicate(seed.email));
        }
        records.push(HelperValidation::from(seed));
    }

    Ok(records)
}

/// Read and parse a seed file
pub async fn load_seed_file(path: &Path) -> Result<Vec<HelperValidation>, SeedError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;

    parse_seed(&json)
}
