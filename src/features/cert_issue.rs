//! Certificate issuance (`check_asset_cert_issue_transaction`, "Asset cert issue").

use crate::asset::{domain_of, CertType};
use crate::error::{ValidationError, ValidationFailure, ValidationResult};
use crate::store::ChainStore;
use crate::types::Transaction;

pub fn check_asset_cert_issue_transaction<C: ChainStore + ?Sized>(tx: &Transaction, chain: &C) -> ValidationResult<()> {
    let cert_issue_outputs: Vec<_> = tx.outputs.iter().filter(|o| o.is_asset_cert_issue()).collect();
    if cert_issue_outputs.is_empty() {
        return Ok(());
    }
    if cert_issue_outputs.len() != 1 {
        return Err(ValidationFailure::new(ValidationError::AssetCertIssueError));
    }
    let cert = cert_issue_outputs[0].asset_cert();

    if chain.is_asset_cert_exist(&cert.symbol, cert.cert_type) {
        return Err(ValidationFailure::new(ValidationError::AssetCertExist));
    }

    if cert.cert_type == CertType::Naming {
        let domain_outputs: Vec<_> = tx
            .outputs
            .iter()
            .filter(|o| o.is_any_asset_cert() && o.asset_cert().cert_type == CertType::Domain)
            .collect();
        if domain_outputs.len() != 1 {
            return Err(ValidationFailure::new(ValidationError::AssetCertIssueError));
        }
        let domain_cert = domain_outputs[0].asset_cert();
        if domain_of(&cert.symbol) != Some(domain_cert.symbol.as_str()) {
            return Err(ValidationFailure::new(ValidationError::AssetCertIssueError));
        }
        let owner_address = chain
            .get_registered_did(&domain_cert.owner_did)
            .map(|did| did.address)
            .ok_or_else(|| ValidationFailure::new(ValidationError::AssetCertIssueError))?;
        if owner_address != domain_cert.address {
            return Err(ValidationFailure::new(ValidationError::AssetCertIssueError));
        }
        if chain.is_asset_exist(&cert.symbol) {
            return Err(ValidationFailure::new(ValidationError::AssetExist));
        }
    }

    for output in &tx.outputs {
        if output.is_asset_cert_issue() {
            continue;
        }
        if cert.cert_type == CertType::Naming && output.is_any_asset_cert() && output.asset_cert().cert_type == CertType::Domain {
            continue;
        }
        if !super::is_plain_companion(output) {
            return Err(ValidationFailure::new(ValidationError::AssetCertIssueError));
        }
    }

    Ok(())
}
