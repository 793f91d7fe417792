//! Stateless (or chain-read-only) basic transaction checks

use crate::asset::{is_valid_did_symbol, is_valid_symbol};
use crate::consensus_params::{
    is_allowed_output_lock_height, COINBASE_SCRIPT_SIZE_RANGE, MAX_MONEY, MAX_TRANSACTION_SIZE, TX_VERSION_CHECK_NOVA_FEATURE,
    TX_VERSION_CHECK_NOVA_TESTNET, TX_VERSION_CHECK_OUTPUT_SCRIPT, TX_VERSION_MAX,
};
use crate::error::{ValidationError, ValidationFailure, ValidationResult};
use crate::nova::is_nova_active;
use crate::store::ChainStore;
use crate::types::{Attachment, ScriptPattern, Transaction};

/// Always `true` in the source this validator is modeled on: `is_not_standard`
/// is consequently unreachable. Preserved verbatim as a known anomaly
/// rather than silently removed.
fn is_standard(_tx: &Transaction) -> bool {
    true
}

/// `check_transaction_basic` fails with the specified
/// error on the first violated rule.
pub async fn check_transaction_basic<C: ChainStore + ?Sized>(
    tx: &Transaction,
    chain: &C,
) -> ValidationResult<()> {
    debug_assert!(is_standard(tx), "is_not_standard is unreachable by construction");

    if tx.version >= TX_VERSION_MAX {
        return Err(ValidationFailure::new(ValidationError::TransactionVersionError));
    }

    let settings = chain.chain_settings();
    let last_height = match chain.fetch_last_height().await.into_option() {
        Some(h) => h,
        None => 0,
    };
    let nova_active = is_nova_active(settings, last_height);

    if tx.version == TX_VERSION_CHECK_NOVA_FEATURE && !nova_active {
        return Err(ValidationFailure::new(ValidationError::NovaFeatureNotActivated));
    }
    if tx.version == TX_VERSION_CHECK_NOVA_TESTNET && !settings.use_testnet_rules {
        return Err(ValidationFailure::new(ValidationError::TransactionVersionError));
    }

    if tx.version >= TX_VERSION_CHECK_OUTPUT_SCRIPT {
        for output in &tx.outputs {
            if output.script_pattern == ScriptPattern::NonStandard {
                return Err(ValidationFailure::new(ValidationError::ScriptNotStandard));
            }
        }
    }

    if tx.inputs.is_empty() || tx.outputs.is_empty() {
        return Err(ValidationFailure::new(ValidationError::EmptyTransaction));
    }

    if tx.serialized_size() > MAX_TRANSACTION_SIZE {
        return Err(ValidationFailure::new(ValidationError::SizeLimits));
    }

    let mut total_output_value: u64 = 0;
    for output in &tx.outputs {
        if output.value > MAX_MONEY {
            return Err(ValidationFailure::new(ValidationError::OutputValueOverflow));
        }
        total_output_value = total_output_value
            .checked_add(output.value)
            .filter(|sum| *sum <= MAX_MONEY)
            .ok_or_else(|| ValidationFailure::new(ValidationError::OutputValueOverflow))?;
    }

    for output in &tx.outputs {
        match &output.attachment {
            Attachment::AssetIssue(a) | Attachment::AssetSecondaryIssue(a) => {
                if !is_valid_symbol(&a.symbol, nova_active) {
                    return Err(ValidationFailure::new(ValidationError::AssetSymbolInvalid));
                }
            }
            Attachment::AssetTransfer { symbol, .. } => {
                if !is_valid_symbol(symbol, nova_active) {
                    return Err(ValidationFailure::new(ValidationError::AssetSymbolInvalid));
                }
            }
            Attachment::AssetCert(c) | Attachment::AssetCertIssue(c) => {
                if !is_valid_symbol(&c.symbol, nova_active) {
                    return Err(ValidationFailure::new(ValidationError::AssetSymbolInvalid));
                }
                if chain.get_did_from_address(&c.address).is_none() && chain.get_registered_did(&c.owner_did).is_none() {
                    return Err(ValidationFailure::new(ValidationError::DidAddressNeeded));
                }
            }
            Attachment::AssetMitRegister(m) | Attachment::AssetMitTransfer(m) => {
                if !is_valid_symbol(&m.symbol, nova_active) {
                    return Err(ValidationFailure::new(ValidationError::MitSymbolInvalid));
                }
            }
            Attachment::DidRegister(d) | Attachment::DidTransfer(d) => {
                if !is_valid_did_symbol(&d.symbol, |s| chain.is_valid_address(s)) {
                    return Err(ValidationFailure::new(ValidationError::DidSymbolInvalid));
                }
            }
            Attachment::Etp | Attachment::Message(_) => {}
        }
    }

    if tx.version >= TX_VERSION_CHECK_NOVA_FEATURE {
        for output in &tx.outputs {
            if !attachment_is_valid(output) {
                return Err(ValidationFailure::new(ValidationError::AttachmentInvalid));
            }
        }
    }

    if tx.is_coinbase() {
        let script_len = tx.inputs[0].script.0.len();
        if !COINBASE_SCRIPT_SIZE_RANGE.contains(&script_len) {
            return Err(ValidationFailure::new(ValidationError::InvalidCoinbaseScriptSize));
        }
    } else {
        for (index, input) in tx.inputs.iter().enumerate() {
            if input.previous_output.is_null() {
                return Err(ValidationFailure::new(ValidationError::PreviousOutputNull));
            }
            if let Some(claimed_lock_height) = input.claimed_lock_height {
                match chain.fetch_transaction_index(input.previous_output.tx_hash).await {
                    crate::store::FetchResult::Found(parent_height) => {
                        let matured = last_height.saturating_sub(parent_height);
                        if u64::from(claimed_lock_height) > matured {
                            return Err(ValidationFailure::at_input(
                                ValidationError::InvalidInputScriptLockHeight,
                                index,
                            ));
                        }
                    }
                    crate::store::FetchResult::NotFound => {
                        return Err(ValidationFailure::at_input(ValidationError::InputNotFound, index));
                    }
                }
            }
        }
    }

    for output in &tx.outputs {
        if let ScriptPattern::PayKeyHashWithLockHeight { lock_height } = output.script_pattern {
            if !is_allowed_output_lock_height(lock_height) {
                return Err(ValidationFailure::new(ValidationError::InvalidOutputScriptLockHeight));
            }
        }
    }

    if tx.version >= TX_VERSION_CHECK_NOVA_FEATURE {
        for output in &tx.outputs {
            if output.script_pattern == ScriptPattern::PayKeyHashWithAttenuationModel {
                let max_supply = match &output.attachment {
                    Attachment::AssetIssue(a) | Attachment::AssetSecondaryIssue(a) => a.max_supply,
                    _ => continue,
                };
                match &output.attenuation_model {
                    Some(model) if model.is_valid_for_supply(max_supply) => {}
                    _ => return Err(ValidationFailure::new(ValidationError::AttenuationModelParamError)),
                }
            }
        }
    }

    Ok(())
}

/// Generic attachment invariants gated on the nova-feature version check.
/// Kind-specific business rules live in [`crate::features`]; this is
/// only the shape check.
fn attachment_is_valid(output: &crate::types::Output) -> bool {
    match &output.attachment {
        Attachment::AssetIssue(a) | Attachment::AssetSecondaryIssue(a) => {
            !a.symbol.is_empty() && a.max_supply > 0 && a.threshold().is_value_ok()
        }
        Attachment::AssetTransfer { symbol, .. } => !symbol.is_empty(),
        Attachment::AssetCert(c) | Attachment::AssetCertIssue(c) => {
            !c.symbol.is_empty() && !c.owner_did.is_empty() && !c.address.is_empty()
        }
        Attachment::AssetMitRegister(m) | Attachment::AssetMitTransfer(m) => {
            !m.symbol.is_empty() && !m.address.is_empty()
        }
        Attachment::DidRegister(d) | Attachment::DidTransfer(d) => !d.symbol.is_empty() && !d.address.is_empty(),
        Attachment::Etp | Attachment::Message(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sample_etp_input, sample_etp_output, FakeChain};

    #[tokio::test]
    async fn empty_transaction_is_rejected() {
        let chain = FakeChain::default();
        let tx = Transaction { hash: crate::types::TxHash([1; 32]), version: 1, inputs: vec![], outputs: vec![] };
        let err = check_transaction_basic(&tx, &chain).await.unwrap_err();
        assert_eq!(err.error, ValidationError::EmptyTransaction);
    }

    #[tokio::test]
    async fn oversized_output_value_is_rejected() {
        let chain = FakeChain::default();
        let mut output = sample_etp_output("addr-a", MAX_MONEY);
        output.value = MAX_MONEY + 1;
        let tx = Transaction {
            hash: crate::types::TxHash([2; 32]),
            version: 1,
            inputs: vec![sample_etp_input(crate::types::TxHash([9; 32]), 0)],
            outputs: vec![output],
        };
        let err = check_transaction_basic(&tx, &chain).await.unwrap_err();
        assert_eq!(err.error, ValidationError::OutputValueOverflow);
    }

    #[tokio::test]
    async fn nova_version_rejected_before_activation() {
        let chain = FakeChain::default();
        let tx = Transaction {
            hash: crate::types::TxHash([3; 32]),
            version: TX_VERSION_CHECK_NOVA_FEATURE,
            inputs: vec![sample_etp_input(crate::types::TxHash([9; 32]), 0)],
            outputs: vec![sample_etp_output("addr-a", 10_000)],
        };
        let err = check_transaction_basic(&tx, &chain).await.unwrap_err();
        assert_eq!(err.error, ValidationError::NovaFeatureNotActivated);
    }
}
