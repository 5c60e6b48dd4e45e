//! Integration tests for dossier-ledger
//!
//! These tests verify the claim lifecycle against a real filesystem.

use dossier_ledger::{ClaimLedger, LedgerError};

#[test]
fn test_missing_claims_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ClaimLedger::new(dir.path().join("does-not-exist"));
    assert!(matches!(result, Err(LedgerError::MissingClaimsDir(_))));
}

#[test]
fn test_claim_unclaimed_batch() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = ClaimLedger::new(dir.path()).unwrap();

    let record = ledger.claim("001", "alice").unwrap();
    assert_eq!(record.batch_id, "001");
    assert_eq!(record.claimant, "alice");

    // Persisted as plain text: handle line then timestamp line
    let contents = std::fs::read_to_string(dir.path().join("001.txt")).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("alice"));
    assert!(lines.next().unwrap().starts_with("Claimed on "));
}

#[test]
fn test_second_claim_reports_original_claimant() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = ClaimLedger::new(dir.path()).unwrap();

    ledger.claim("002", "alice").unwrap();
    let err = ledger.claim("002", "bob").unwrap_err();

    match err {
        LedgerError::AlreadyClaimed { batch_id, claimant } => {
            assert_eq!(batch_id, "002");
            assert_eq!(claimant, "alice");
        }
        other => panic!("expected AlreadyClaimed, got {:?}", other),
    }

    // The original record is untouched
    let record = ledger.get("002").unwrap().unwrap();
    assert_eq!(record.claimant, "alice");
}

#[test]
fn test_claims_on_different_batches_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = ClaimLedger::new(dir.path()).unwrap();

    ledger.claim("003", "alice").unwrap();
    ledger.claim("004", "bob").unwrap();

    assert_eq!(ledger.get("003").unwrap().unwrap().claimant, "alice");
    assert_eq!(ledger.get("004").unwrap().unwrap().claimant, "bob");
}

#[test]
fn test_get_unclaimed_batch() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = ClaimLedger::new(dir.path()).unwrap();
    assert!(ledger.get("999").unwrap().is_none());
}

#[test]
fn test_get_parses_record() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = ClaimLedger::new(dir.path()).unwrap();

    let written = ledger.claim("005", "carol").unwrap();
    let read = ledger.get("005").unwrap().unwrap();
    assert_eq!(read, written);
}

#[test]
fn test_empty_record_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("006.txt"), "").unwrap();

    let ledger = ClaimLedger::new(dir.path()).unwrap();
    // A claim attempt hits the existing (empty) file and cannot name a claimant
    let err = ledger.claim("006", "dave").unwrap_err();
    assert!(matches!(err, LedgerError::MalformedRecord(id) if id == "006"));
}
