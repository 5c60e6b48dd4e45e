//! Dossier Claim Ledger
//!
//! File-backed exclusive claims over batch identifiers, coordinating
//! contributors so two people never process the same batch. One plain-text
//! record per batch id, created atomically and immutable thereafter - no
//! expiry, no release.
//!
//! Exclusivity comes from `OpenOptions::create_new` (exclusive create at
//! the filesystem level), so two contributors racing for the same batch id
//! cannot both succeed; the loser is told who holds the claim.
//!
//! # Record format
//!
//! ```text
//! alice
//! Claimed on 2026-08-23T10:15:00+00:00
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use dossier_ledger::ClaimLedger;
//!
//! let ledger = ClaimLedger::new("claims").unwrap();
//! match ledger.claim("007", "alice") {
//!     Ok(record) => println!("claimed at {}", record.claimed_at),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

#![warn(missing_docs)]

use chrono::Utc;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The claims directory does not exist
    #[error("Claims directory not found: {0}")]
    MissingClaimsDir(PathBuf),

    /// The batch is already claimed by another contributor
    #[error("Batch {batch_id} is already claimed by: {claimant}")]
    AlreadyClaimed {
        /// The contested batch id
        batch_id: String,
        /// Handle of the contributor holding the claim
        claimant: String,
    },

    /// Claim record exists but is empty or unreadable
    #[error("Claim record for batch {0} is malformed")]
    MalformedRecord(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A persisted claim over one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRecord {
    /// The claimed batch id
    pub batch_id: String,

    /// Handle of the claiming contributor
    pub claimant: String,

    /// Timestamp line recorded at claim time
    pub claimed_at: String,
}

/// The claim ledger: one record file per batch id under a claims directory.
pub struct ClaimLedger {
    claims_dir: PathBuf,
}

impl ClaimLedger {
    /// Open the ledger at an existing claims directory.
    ///
    /// The directory is expected to be tracked (contributors commit claim
    /// files), so its absence is an error rather than something to fix up
    /// silently.
    pub fn new<P: AsRef<Path>>(claims_dir: P) -> Result<Self, LedgerError> {
        let claims_dir = claims_dir.as_ref().to_path_buf();
        if !claims_dir.is_dir() {
            return Err(LedgerError::MissingClaimsDir(claims_dir));
        }
        Ok(Self { claims_dir })
    }

    /// Claim a batch for a contributor.
    ///
    /// Succeeds only if no record exists for the batch id yet. The create
    /// is atomic (`create_new`), so concurrent claimants cannot both win;
    /// the failure path names the existing claimant.
    pub fn claim(&self, batch_id: &str, handle: &str) -> Result<ClaimRecord, LedgerError> {
        let path = self.record_path(batch_id);
        let claimed_at = Utc::now().to_rfc3339();

        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let existing = self.get(batch_id)?.ok_or_else(|| {
                    LedgerError::MalformedRecord(batch_id.to_string())
                })?;
                return Err(LedgerError::AlreadyClaimed {
                    batch_id: batch_id.to_string(),
                    claimant: existing.claimant,
                });
            }
            Err(e) => return Err(e.into()),
        };

        write!(file, "{}\nClaimed on {}\n", handle, claimed_at)?;
        info!("Batch {} claimed by {}", batch_id, handle);

        Ok(ClaimRecord {
            batch_id: batch_id.to_string(),
            claimant: handle.to_string(),
            claimed_at,
        })
    }

    /// Look up the claim record for a batch id, if any.
    pub fn get(&self, batch_id: &str) -> Result<Option<ClaimRecord>, LedgerError> {
        let path = self.record_path(batch_id);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut lines = contents.lines();
        let claimant = lines
            .next()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| LedgerError::MalformedRecord(batch_id.to_string()))?;
        let claimed_at = lines
            .next()
            .map(|l| l.trim().trim_start_matches("Claimed on ").to_string())
            .unwrap_or_default();

        Ok(Some(ClaimRecord {
            batch_id: batch_id.to_string(),
            claimant: claimant.to_string(),
            claimed_at,
        }))
    }

    fn record_path(&self, batch_id: &str) -> PathBuf {
        self.claims_dir.join(format!("{}.txt", batch_id))
    }
}
