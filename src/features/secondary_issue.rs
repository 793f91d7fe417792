//! Secondary issuance (`check_secondaryissue_transaction`, "Secondary issue").

use crate::asset::{is_secondaryissue_owns_enough, CertType};
use crate::error::{ValidationError, ValidationFailure, ValidationResult};
use crate::store::{ChainStore, PoolStore};
use crate::types::Transaction;

pub async fn check_secondaryissue_transaction<C, P>(tx: &Transaction, chain: &C, pool: &P) -> ValidationResult<()>
where
    C: ChainStore + ?Sized,
    P: PoolStore + ?Sized,
{
    let secondary_outputs: Vec<_> = tx.outputs.iter().filter(|o| o.is_asset_secondaryissue()).collect();
    if secondary_outputs.is_empty() {
        return Ok(());
    }
    if secondary_outputs.len() != 1 {
        return Err(ValidationFailure::new(ValidationError::AssetSecondaryIssueError));
    }
    let asset = secondary_outputs[0].asset_detail();
    let threshold = asset.threshold();
    if !threshold.is_value_ok() {
        return Err(ValidationFailure::new(ValidationError::AssetSecondaryIssueThresholdInvalid));
    }

    if let Some(model) = &secondary_outputs[0].attenuation_model {
        if !model.is_valid_for_supply(asset.max_supply) {
            return Err(ValidationFailure::new(ValidationError::AttenuationModelParamError));
        }
    }

    let mut issue_cert_count = 0usize;
    let mut asset_transfer_volume: u64 = 0;

    for output in &tx.outputs {
        if output.is_asset_secondaryissue() {
            continue;
        }
        if output.is_asset_transfer() {
            let (symbol, amount) = output.asset_transfer();
            if symbol != asset.symbol || output.address() != Some(asset.issuer_address.as_str()) {
                return Err(ValidationFailure::new(ValidationError::AssetSecondaryIssueError));
            }
            asset_transfer_volume = asset_transfer_volume
                .checked_add(amount)
                .ok_or_else(|| ValidationFailure::new(ValidationError::OutputValueOverflow))?;
            continue;
        }
        if output.is_any_asset_cert() {
            let cert = output.asset_cert();
            if cert.cert_type != CertType::Issue {
                return Err(ValidationFailure::new(ValidationError::AssetSecondaryIssueError));
            }
            issue_cert_count += 1;
            if issue_cert_count > 1 {
                return Err(ValidationFailure::new(ValidationError::AssetSecondaryIssueError));
            }
            continue;
        }
        if !super::is_plain_companion(output) {
            return Err(ValidationFailure::new(ValidationError::AssetSecondaryIssueError));
        }
    }

    if tx.version >= crate::consensus_params::TX_VERSION_CHECK_NOVA_FEATURE && issue_cert_count == 0 {
        return Err(ValidationFailure::new(ValidationError::AssetCertError));
    }

    let total_volume = chain.get_asset_volume(&asset.symbol);
    if total_volume.checked_add(asset.max_supply).is_none() {
        return Err(ValidationFailure::new(ValidationError::OutputValueOverflow));
    }
    if !is_secondaryissue_owns_enough(asset_transfer_volume, total_volume, threshold) {
        return Err(ValidationFailure::new(ValidationError::AssetSecondaryIssueShareNotEnough));
    }

    // Known anomaly: only asset/cert-spending inputs are
    // address-bound to the issuer here; etp inputs are left unrestricted.
    for input in &tx.inputs {
        let Some(previous) = super::resolve_previous_output(chain, pool, input.previous_output).await else {
            continue;
        };
        if previous.is_asset_issue() || previous.is_asset_secondaryissue() {
            if previous.address() != Some(asset.issuer_address.as_str()) {
                return Err(ValidationFailure::new(ValidationError::ValidateInputsFailed));
            }
        } else if previous.is_any_asset_cert() {
            let cert = previous.asset_cert();
            if cert.cert_type != CertType::Issue || cert.symbol != asset.symbol {
                return Err(ValidationFailure::new(ValidationError::ValidateInputsFailed));
            }
        }
    }

    Ok(())
}
