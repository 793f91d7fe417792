//! Per-asset-feature checks
//!
//! Each check runs against the transaction as a whole and is a no-op if no
//! output of its kind is present. They share one idiom (design note
//! "Output-aggregate check patterns"): scan every output, accumulate the
//! ones of interest, allow a small whitelist of companion kinds (etp,
//! message) to pass through untouched via [`is_plain_companion`], and
//! reject anything else.

mod cert_issue;
mod did;
mod issue;
mod mit;
mod secondary_issue;

pub use cert_issue::check_asset_cert_issue_transaction;
pub use did::check_did_transaction;
pub use issue::check_asset_issue_transaction;
pub use mit::check_asset_mit_register_transaction;
pub use secondary_issue::check_secondaryissue_transaction;

use crate::error::ValidationResult;
use crate::store::{ChainStore, PoolStore};
use crate::types::{OutPoint, Output, Transaction};

/// An output that is neither the kind a feature check is scanning for, nor
/// plain etp/message, is always a companion violation: it means the
/// transaction mixes unrelated business in one feature's slot.
pub(crate) fn is_plain_companion(output: &Output) -> bool {
    output.is_etp() || output.is_message()
}

/// Resolves the output a transaction input spends: confirmed chain first,
/// falling back to the mempool.
pub(crate) async fn resolve_previous_output<C, P>(
    chain: &C,
    pool: &P,
    outpoint: OutPoint,
) -> Option<Output>
where
    C: ChainStore + ?Sized,
    P: PoolStore + ?Sized,
{
    if let crate::store::FetchResult::Found((tx, _height)) = chain.fetch_transaction(outpoint.tx_hash).await {
        return tx.outputs.into_iter().nth(outpoint.index as usize);
    }
    let tx: Transaction = pool.find(outpoint.tx_hash)?;
    tx.outputs.into_iter().nth(outpoint.index as usize)
}

/// Runs all five per-feature checks in a fixed order, short-circuiting on
/// the first failure.
pub async fn check_transaction_features<C, P>(tx: &Transaction, chain: &C, pool: &P) -> ValidationResult<()>
where
    C: ChainStore + ?Sized,
    P: PoolStore + ?Sized,
{
    check_asset_issue_transaction(tx, chain)?;
    check_asset_cert_issue_transaction(tx, chain)?;
    check_secondaryissue_transaction(tx, chain, pool).await?;
    check_asset_mit_register_transaction(tx, chain, pool).await?;
    check_did_transaction(tx, chain, pool).await?;
    Ok(())
}
