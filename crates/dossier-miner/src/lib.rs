//! Dossier Miner
//!
//! Drives the extraction of dossier records from a batch of documents:
//! prepare each document (inline text or native upload), assemble the
//! prompt from the template and schema, invoke the configured provider,
//! parse and stamp the result, gate it through structural validation, and
//! persist one pretty-printed JSON record per accepted document.
//!
//! Processing is sequential with a fixed pause between documents. Every
//! failure is local to the document that caused it; the batch always runs
//! to completion. Only a missing prompt template or an unreadable batch
//! directory aborts a run, since those are preconditions for every
//! document.

#![warn(missing_docs)]

mod config;
mod error;
mod miner;
mod prepare;
mod prompt;

pub use config::MinerConfig;
pub use error::MinerError;
pub use miner::{BatchSummary, DocumentOutcome, Miner};
pub use prepare::{prepare_document, Prepared};
pub use prompt::{PromptTemplate, FILE_PLACEHOLDER, SCHEMA_MARKER, TEXT_MARKER};
