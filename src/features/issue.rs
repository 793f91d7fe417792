//! Asset issuance (`check_asset_issue_transaction`, "Asset issue").

use crate::asset::{domain_of, is_registrable_domain, CertMask, CertType};
use crate::error::{ValidationError, ValidationFailure, ValidationResult};
use crate::store::ChainStore;
use crate::types::{AttachmentVersion, Transaction};

pub fn check_asset_issue_transaction<C: ChainStore + ?Sized>(tx: &Transaction, chain: &C) -> ValidationResult<()> {
    let issue_outputs: Vec<_> = tx.outputs.iter().filter(|o| o.is_asset_issue()).collect();
    if issue_outputs.is_empty() {
        return Ok(());
    }
    if issue_outputs.len() > 1 {
        return Err(ValidationFailure::new(ValidationError::AssetIssueError));
    }
    let asset = issue_outputs[0].asset_detail();

    if chain.is_asset_exist(&asset.symbol) {
        return Err(ValidationFailure::new(ValidationError::AssetExist));
    }

    if issue_outputs[0].attenuation_model.is_some() {
        match &issue_outputs[0].attenuation_model {
            Some(model) if model.is_valid_for_supply(asset.max_supply) => {}
            _ => return Err(ValidationFailure::new(ValidationError::AttenuationModelParamError)),
        }
    }

    let mut issue_certs = 0usize;
    let mut naming_or_domain_certs = 0usize;
    let mut present_mask = CertMask::NONE;
    let mut domain_or_naming_owner: Option<&str> = None;

    for output in &tx.outputs {
        if output.is_asset_issue() {
            continue;
        }
        if output.is_any_asset_cert() {
            let cert = output.asset_cert();
            present_mask = present_mask.with(CertMask::for_cert_type(cert.cert_type));
            match cert.cert_type {
                CertType::Issue => {
                    issue_certs += 1;
                    if issue_certs > 1 || cert.symbol != asset.symbol || cert.address != asset.issuer_address {
                        return Err(ValidationFailure::new(ValidationError::AssetIssueError));
                    }
                }
                CertType::Naming => {
                    naming_or_domain_certs += 1;
                    if naming_or_domain_certs > 1 || cert.symbol != asset.symbol {
                        return Err(ValidationFailure::new(ValidationError::AssetIssueError));
                    }
                    check_owner_consistency(&mut domain_or_naming_owner, &cert.owner_did)?;
                }
                CertType::Domain => {
                    naming_or_domain_certs += 1;
                    let expected_domain = domain_of(&asset.symbol);
                    if naming_or_domain_certs > 1 || expected_domain != Some(cert.symbol.as_str()) {
                        return Err(ValidationFailure::new(ValidationError::AssetIssueError));
                    }
                    check_owner_consistency(&mut domain_or_naming_owner, &cert.owner_did)?;
                }
                CertType::None => return Err(ValidationFailure::new(ValidationError::AssetIssueError)),
            }
        } else if !super::is_plain_companion(output) {
            return Err(ValidationFailure::new(ValidationError::AssetIssueError));
        }
    }

    if tx.version >= crate::consensus_params::TX_VERSION_CHECK_NOVA_FEATURE {
        if !asset.cert_mask.satisfied_by(present_mask) {
            return Err(ValidationFailure::new(ValidationError::AssetIssueError));
        }
        if let Some(domain) = domain_of(&asset.symbol) {
            if is_registrable_domain(domain) {
                if naming_or_domain_certs == 0 {
                    return Err(ValidationFailure::new(ValidationError::AssetCertNotProvided));
                }
                if domain_or_naming_owner.is_none_or(str::is_empty) {
                    return Err(ValidationFailure::new(ValidationError::AssetCertError));
                }
            }
        }
    }

    for output in &tx.outputs {
        if output.attachment_version == AttachmentVersion::DidVerify && (output.is_asset_issue() || output.is_asset_secondaryissue()) {
            if let Some(to_did) = &output.to_did {
                if to_did != &asset.issuer_did {
                    return Err(ValidationFailure::new(ValidationError::AssetDidRegisterNotMatch));
                }
            }
        }
    }

    Ok(())
}

fn check_owner_consistency(slot: &mut Option<&str>, owner_did: &str) -> ValidationResult<()> {
    match slot {
        Some(existing) if *existing != owner_did => Err(ValidationFailure::new(ValidationError::AssetIssueError)),
        _ => {
            *slot = Some(owner_did);
            Ok(())
        }
    }
}
