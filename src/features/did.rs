//! DID registration and transfer (`check_did_transaction`, "DID").

use crate::asset::is_valid_did_symbol;
use crate::error::{ValidationError, ValidationFailure, ValidationResult};
use crate::store::{ChainStore, PoolStore};
use crate::types::{AttachmentVersion, Output, Transaction};

pub async fn check_did_transaction<C, P>(tx: &Transaction, chain: &C, pool: &P) -> ValidationResult<()>
where
    C: ChainStore + ?Sized,
    P: PoolStore + ?Sized,
{
    for output in &tx.outputs {
        check_attachment_address(output, chain)?;
        if let Some(to_did) = &output.to_did {
            check_attachment_did_match_address(output, to_did, chain)?;
        }
        if let Some(from_did) = &output.from_did {
            check_from_did_spent(tx, chain, pool, from_did).await?;
        }
        if output.attachment_version == AttachmentVersion::DidVerify && output.is_any_asset_cert() {
            if let Some(to_did) = &output.to_did {
                if &output.asset_cert().owner_did != to_did {
                    return Err(ValidationFailure::new(ValidationError::AssetDidRegisterNotMatch));
                }
            }
        }
    }

    let register_outputs: Vec<_> = tx.outputs.iter().filter(|o| o.is_did_register()).collect();
    let transfer_outputs: Vec<_> = tx.outputs.iter().filter(|o| o.is_did_transfer()).collect();

    if !register_outputs.is_empty() && !transfer_outputs.is_empty() {
        return Err(ValidationFailure::new(ValidationError::DidMultiTypeExist));
    }
    if register_outputs.len() > 1 || transfer_outputs.len() > 1 {
        return Err(ValidationFailure::new(ValidationError::DidMultiTypeExist));
    }

    if let Some(output) = register_outputs.first() {
        check_did_register(tx, chain, pool, output).await?;
    }
    if let Some(output) = transfer_outputs.first() {
        check_did_transfer(tx, chain, pool, output).await?;
    }

    Ok(())
}

fn check_attachment_address<C: ChainStore + ?Sized>(output: &Output, chain: &C) -> ValidationResult<()> {
    if let Some(address) = output.address() {
        if !chain.is_valid_address(address) {
            return Err(ValidationFailure::new(ValidationError::DidAddressNotMatch));
        }
    }
    Ok(())
}

fn check_attachment_did_match_address<C: ChainStore + ?Sized>(
    output: &Output,
    to_did: &str,
    chain: &C,
) -> ValidationResult<()> {
    let Some(address) = output.address() else { return Ok(()) };
    match chain.get_did_from_address(address) {
        Some(bound) if bound == to_did => Ok(()),
        _ => Err(ValidationFailure::new(ValidationError::DidAddressNotMatch)),
    }
}

async fn check_from_did_spent<C, P>(tx: &Transaction, chain: &C, pool: &P, from_did: &str) -> ValidationResult<()>
where
    C: ChainStore + ?Sized,
    P: PoolStore + ?Sized,
{
    for input in &tx.inputs {
        if let Some(previous) = super::resolve_previous_output(chain, pool, input.previous_output).await {
            if let Some(address) = previous.address() {
                if chain.get_did_from_address(address).as_deref() == Some(from_did) {
                    return Ok(());
                }
            }
        }
    }
    Err(ValidationFailure::new(ValidationError::DidInputError))
}

async fn check_did_register<C, P>(tx: &Transaction, chain: &C, pool: &P, output: &Output) -> ValidationResult<()>
where
    C: ChainStore + ?Sized,
    P: PoolStore + ?Sized,
{
    let did = output.did();
    if !is_valid_did_symbol(&did.symbol, |addr| chain.is_valid_address(addr)) {
        return Err(ValidationFailure::new(ValidationError::DidSymbolInvalid));
    }
    if chain.is_did_exist(&did.symbol) {
        return Err(ValidationFailure::new(ValidationError::DidExist));
    }
    if chain.get_did_from_address(&did.address).is_some() {
        return Err(ValidationFailure::new(ValidationError::AddressRegisteredDid));
    }

    for input in &tx.inputs {
        if let Some(previous) = super::resolve_previous_output(chain, pool, input.previous_output).await {
            if previous.is_etp() && previous.address() == Some(did.address.as_str()) {
                return Ok(());
            }
        }
    }
    Err(ValidationFailure::new(ValidationError::DidInputError))
}

async fn check_did_transfer<C, P>(tx: &Transaction, chain: &C, pool: &P, output: &Output) -> ValidationResult<()>
where
    C: ChainStore + ?Sized,
    P: PoolStore + ?Sized,
{
    let did = output.did();
    if !chain.is_did_exist(&did.symbol) {
        return Err(ValidationFailure::new(ValidationError::DidNotExist));
    }
    if chain.get_did_from_address(&did.address).is_some() {
        return Err(ValidationFailure::new(ValidationError::AddressRegisteredDid));
    }
    if tx.inputs.len() != 2 {
        return Err(ValidationFailure::new(ValidationError::DidInputError));
    }

    let mut spends_prior_did = false;
    let mut spends_new_address_etp = false;
    for input in &tx.inputs {
        let Some(previous) = super::resolve_previous_output(chain, pool, input.previous_output).await else {
            continue;
        };
        if previous.is_did() && previous.did().symbol == did.symbol {
            spends_prior_did = true;
        } else if previous.is_etp() && previous.address() == Some(did.address.as_str()) {
            spends_new_address_etp = true;
        }
    }
    if !spends_prior_did || !spends_new_address_etp {
        return Err(ValidationFailure::new(ValidationError::DidInputError));
    }

    Ok(())
}
