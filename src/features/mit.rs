//! MIT registration (`check_asset_mit_register_transaction`, "MIT register").

use crate::error::{ValidationError, ValidationFailure, ValidationResult};
use crate::store::{ChainStore, PoolStore};
use crate::types::Transaction;

pub async fn check_asset_mit_register_transaction<C, P>(tx: &Transaction, chain: &C, pool: &P) -> ValidationResult<()>
where
    C: ChainStore + ?Sized,
    P: PoolStore + ?Sized,
{
    let register_outputs: Vec<_> = tx.outputs.iter().filter(|o| o.is_asset_mit_register()).collect();
    if register_outputs.is_empty() {
        return Ok(());
    }

    let registering_address = register_outputs[0].mit().address.clone();
    for output in &register_outputs {
        let mit = output.mit();
        if chain.get_registered_mit(&mit.symbol).is_some() {
            return Err(ValidationFailure::new(ValidationError::MitExist));
        }
        if mit.address != registering_address {
            return Err(ValidationFailure::new(ValidationError::MitRegisterError));
        }
    }

    for input in &tx.inputs {
        let Some(previous) = super::resolve_previous_output(chain, pool, input.previous_output).await else {
            continue;
        };
        if previous.is_etp() && previous.address() != Some(registering_address.as_str()) {
            return Err(ValidationFailure::new(ValidationError::ValidateInputsFailed));
        }
    }

    Ok(())
}
