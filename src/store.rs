//! Read-only chain and pool access interfaces.
//!
//! The validator never mutates either store: lookups are split the same
//! way a block-application path separates its read-only queries from the
//! write that appends a block, so that concurrent validation of distinct
//! transactions only ever shares read access.

use async_trait::async_trait;

use crate::asset::{CertType, DidData, MitData};
use crate::types::{OutPoint, Transaction, TxHash};

/// Outcome of an async chain lookup. Distinct from `Option` so call sites
/// read as "found vs not found" rather than null-checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult<T> {
    Found(T),
    NotFound,
}

impl<T> FetchResult<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, FetchResult::Found(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            FetchResult::Found(v) => Some(v),
            FetchResult::NotFound => None,
        }
    }
}

/// Whether a previous output has already been spent on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendStatus {
    Unspent,
    Spent,
}

/// Chain-wide settings visible to the validator (`use_testnet_rules`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChainSettings {
    pub use_testnet_rules: bool,
}

/// Read-only access to the confirmed chain. All methods that require a
/// store scan or index lookup are async suspension points;
/// cheap in-memory settings lookups stay synchronous.
#[async_trait]
pub trait ChainStore: Send + Sync {
    /// The transaction with this hash and the height it confirmed at.
    async fn fetch_transaction(&self, hash: TxHash) -> FetchResult<(Transaction, u64)>;

    /// The confirmed height of the transaction with this hash (parent
    /// height used for coinbase maturity and lock-height checks).
    async fn fetch_transaction_index(&self, hash: TxHash) -> FetchResult<u64>;

    /// The height of the chain tip.
    async fn fetch_last_height(&self) -> FetchResult<u64>;

    /// Whether `outpoint` has already been spent by a confirmed transaction.
    async fn fetch_spend(&self, outpoint: OutPoint) -> FetchResult<SpendStatus>;

    fn is_asset_exist(&self, symbol: &str) -> bool;
    fn is_did_exist(&self, symbol: &str) -> bool;
    fn is_asset_cert_exist(&self, symbol: &str, cert_type: CertType) -> bool;
    fn get_registered_mit(&self, symbol: &str) -> Option<MitData>;
    fn get_registered_did(&self, symbol: &str) -> Option<DidData>;
    fn get_did_from_address(&self, address: &str) -> Option<String>;
    fn get_asset_volume(&self, symbol: &str) -> u64;
    fn is_valid_address(&self, address: &str) -> bool;
    fn chain_settings(&self) -> ChainSettings;
    fn get_last_height(&self) -> u64;
}

/// Read-only access to the mempool. Synchronous: the
/// mempool container lives in the same process as the validator.
pub trait PoolStore: Send + Sync {
    fn is_in_pool(&self, hash: TxHash) -> bool;
    fn find(&self, hash: TxHash) -> Option<Transaction>;
    fn is_spent_in_pool(&self, tx: &Transaction) -> bool;
}
