//! # etp-tx-validator
//!
//! The transaction admission validator for a UTXO-style chain that extends
//! the base coin model with four asset primitives: fungible assets (issue,
//! secondary issue, transfer), asset certificates (ownership tokens over
//! symbols and domains), non-fungible identifier tokens (MIT), and
//! decentralized identifiers (DIDs). Given a candidate transaction plus
//! read-only access to the confirmed chain and the mempool, it decides
//! whether the transaction is admissible.
//!
//! ## Modules
//! - [`types`]: transaction, output and attachment value types.
//! - [`asset`]: asset/cert/MIT/DID domain types and pure predicates.
//! - [`store`]: read-only chain and pool access interfaces.
//! - [`script`]: script consensus check adapter.
//! - [`consensus_params`]: consensus-sensitive tuning constants.
//! - [`nova`]: nova feature activation gate.
//! - [`basic`]: stateless (or chain-read-only) transaction checks.
//! - [`features`]: per-asset-feature checks (issue, cert issue, secondary
//!   issue, MIT register, DID).
//! - [`validator`]: the orchestrator pipeline.
//! - [`error`]: the closed validation error enumeration.
//! - [`configuration`]: runtime-tunable (non-consensus) validator settings.
//! - [`tracing`]: structured logging of pipeline events.
//!
//! ## Usage
//! ```rust,ignore
//! use etp_tx_validator::validator::TransactionValidator;
//!
//! let validator = TransactionValidator::new(&chain, &pool, &script_checker);
//! let verdict = validator.validate(&transaction).await?;
//! ```

pub mod asset;
pub mod basic;
pub mod configuration;
pub mod consensus_params;
pub mod error;
pub mod features;
pub mod nova;
pub mod script;
pub mod store;
pub mod tracing;
pub mod types;
pub mod validator;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{ValidationError, ValidationFailure, ValidationResult};
pub use validator::{TransactionValidator, Verdict};
