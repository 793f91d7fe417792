//! Asset, certificate, MIT and DID domain types and their invariants.
//!
//! These are pure value types and predicates, no I/O, no chain access.
//! `validator` and `features` compose them against chain/pool reads.

use serde::{Deserialize, Serialize};

/// Minimum and maximum length of a case-normalized asset/MIT/DID symbol.
pub const SYMBOL_MIN_LEN: usize = 1;
pub const SYMBOL_MAX_LEN: usize = 64;

/// Symbols reserved for the native coin and therefore never issuable as an
/// asset, cert, MIT or DID symbol.
const FORBIDDEN_SYMBOLS: &[&str] = &["ETP", "ETP.OWNER"];

/// Returns true if `symbol` can never be registered as an asset/cert/MIT/DID,
/// independent of whether it already exists on chain.
///
/// Consumed by `connect_input` to reject transactions that try to move the
/// reserved native-coin pseudo-symbol through an asset input.
pub fn is_forbidden(symbol: &str) -> bool {
    FORBIDDEN_SYMBOLS.contains(&symbol)
}

/// Version-aware symbol validity check.
///
/// Before the nova feature activates, symbols are restricted to
/// `[A-Z0-9_-]`; once nova is active, a single `.` separator is permitted so
/// that naming certificates can express `DOMAIN.NAME` symbols.
pub fn is_valid_symbol(symbol: &str, nova_active: bool) -> bool {
    if symbol.len() < SYMBOL_MIN_LEN || symbol.len() > SYMBOL_MAX_LEN {
        return false;
    }
    if symbol != symbol.to_ascii_uppercase() {
        return false;
    }
    let dots = symbol.matches('.').count();
    if !nova_active && dots > 0 {
        return false;
    }
    if dots > 1 {
        return false;
    }
    if symbol.starts_with('.') || symbol.ends_with('.') {
        return false;
    }
    symbol
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_' || b == b'-' || b == b'.')
}

/// DID symbols may never look like an address.
pub fn is_valid_did_symbol(symbol: &str, is_address: impl Fn(&str) -> bool) -> bool {
    is_valid_symbol(symbol, true) && !is_address(symbol)
}

/// The domain of a dotted symbol is the portion before the first `.`.
/// A symbol with no `.` has no domain.
pub fn domain_of(symbol: &str) -> Option<&str> {
    symbol.find('.').map(|idx| &symbol[..idx])
}

/// True if `symbol` names a domain that can itself carry a domain
/// certificate (i.e. it is not already a dotted/naming symbol).
pub fn is_registrable_domain(symbol: &str) -> bool {
    domain_of(symbol).is_none()
}

/// Certificate authority type. `None` exists only as the non-cert sentinel
/// used by running aggregates before any cert input has been observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertType {
    Issue,
    Domain,
    Naming,
    None,
}

/// Bitmask of certificate types an asset's issuance requires, latched at
/// issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CertMask(pub u8);

impl CertMask {
    pub const NONE: CertMask = CertMask(0);
    pub const ISSUE: CertMask = CertMask(1 << 0);
    pub const DOMAIN: CertMask = CertMask(1 << 1);
    pub const NAMING: CertMask = CertMask(1 << 2);

    pub fn contains(self, bit: CertMask) -> bool {
        self.0 & bit.0 == bit.0
    }

    pub fn with(self, bit: CertMask) -> CertMask {
        CertMask(self.0 | bit.0)
    }

    pub fn for_cert_type(cert_type: CertType) -> CertMask {
        match cert_type {
            CertType::Issue => CertMask::ISSUE,
            CertType::Domain => CertMask::DOMAIN,
            CertType::Naming => CertMask::NAMING,
            CertType::None => CertMask::NONE,
        }
    }

    /// True if every bit set in `self` is present in `present`.
    pub fn satisfied_by(self, present: CertMask) -> bool {
        self.0 & present.0 == self.0
    }
}

/// Secondary-issue threshold: a 0..=100 percentage, or one of two sentinels.
///
/// Open Question resolution (see `DESIGN.md`): byte `0` means
/// `freely_issuable` (anyone may secondary-issue without owning share),
/// byte `255` means `forbidden` (secondary issuance is permanently closed),
/// and `1..=100` is the percentage of existing volume the issuer must
/// control to be allowed to secondary-issue more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecondaryIssueThreshold {
    FreelyIssuable,
    Percent(u8),
    Forbidden,
}

impl SecondaryIssueThreshold {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => SecondaryIssueThreshold::FreelyIssuable,
            1..=100 => SecondaryIssueThreshold::Percent(byte),
            _ => SecondaryIssueThreshold::Forbidden,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            SecondaryIssueThreshold::FreelyIssuable => 0,
            SecondaryIssueThreshold::Percent(p) => p,
            SecondaryIssueThreshold::Forbidden => 255,
        }
    }

    /// True unless the byte encodes a percentage above 100.
    pub fn is_value_ok(self) -> bool {
        match self {
            SecondaryIssueThreshold::Percent(p) => p <= 100,
            _ => true,
        }
    }
}

/// The issuer's transfer volume must cover `threshold` percent of the
/// existing on-chain volume, computed in `u128` so the intermediate
/// products cannot overflow `u64::MAX * 100`.
pub fn is_secondaryissue_owns_enough(
    asset_transfer_volume: u64,
    total_volume: u64,
    threshold: SecondaryIssueThreshold,
) -> bool {
    match threshold {
        SecondaryIssueThreshold::FreelyIssuable => true,
        SecondaryIssueThreshold::Forbidden => false,
        SecondaryIssueThreshold::Percent(p) => {
            (asset_transfer_volume as u128) * 100 >= (total_volume as u128) * (p as u128)
        }
    }
}

/// Asset definition as it would be recorded on chain once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDetail {
    pub symbol: String,
    pub max_supply: u64,
    pub issuer_address: String,
    pub issuer_did: String,
    pub secondary_issue_threshold: u8,
    pub cert_mask: CertMask,
}

impl AssetDetail {
    pub fn threshold(&self) -> SecondaryIssueThreshold {
        SecondaryIssueThreshold::from_byte(self.secondary_issue_threshold)
    }
}

/// Asset certificate payload carried by `asset-cert`/`asset-cert-issue` outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCertData {
    pub symbol: String,
    pub cert_type: CertType,
    pub owner_did: String,
    pub address: String,
}

/// MIT token payload carried by `asset-mit-register`/`asset-mit-transfer` outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MitData {
    pub symbol: String,
    pub address: String,
}

/// DID payload carried by `did-register`/`did-transfer` outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DidData {
    pub symbol: String,
    pub address: String,
}

/// Attenuation model parameters embedded in a pay-key-hash-with-attenuation
/// output script (nova feature). The model locks a declining schedule of the
/// asset's maximum supply across a sequence of unlock heights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttenuationModel {
    /// Amount locked per period; must sum to the asset's max supply.
    pub locked_amounts: Vec<u64>,
    pub unlock_heights: Vec<u64>,
}

impl AttenuationModel {
    /// Model parameters must be valid against the declared
    /// maximum supply: same count of periods as unlock heights, strictly
    /// increasing heights, and locked amounts summing to exactly the
    /// declared supply so no coin is created or destroyed by the schedule.
    pub fn is_valid_for_supply(&self, max_supply: u64) -> bool {
        if self.locked_amounts.is_empty() || self.locked_amounts.len() != self.unlock_heights.len() {
            return false;
        }
        if !self.unlock_heights.windows(2).all(|w| w[0] < w[1]) {
            return false;
        }
        let mut total: u64 = 0;
        for &amount in &self.locked_amounts {
            total = match total.checked_add(amount) {
                Some(t) => t,
                None => return false,
            };
        }
        total == max_supply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_validity_tracks_nova_activation() {
        assert!(is_valid_symbol("ABC", false));
        assert!(!is_valid_symbol("abc", false));
        assert!(!is_valid_symbol("FOO.BAR", false));
        assert!(is_valid_symbol("FOO.BAR", true));
        assert!(!is_valid_symbol("FOO.BAR.BAZ", true));
        assert!(!is_valid_symbol(".BAR", true));
    }

    #[test]
    fn domain_of_splits_on_first_dot() {
        assert_eq!(domain_of("FOO"), None);
        assert_eq!(domain_of("FOO.BAR"), Some("FOO"));
    }

    #[test]
    fn secondary_issue_share_boundary() {
        let threshold = SecondaryIssueThreshold::from_byte(50);
        assert!(!is_secondaryissue_owns_enough(400_000, 1_000_000, threshold));
        assert!(is_secondaryissue_owns_enough(600_000, 1_000_000, threshold));
        assert!(is_secondaryissue_owns_enough(500_000, 1_000_000, threshold));
    }

    #[test]
    fn freely_issuable_and_forbidden_sentinels() {
        assert!(is_secondaryissue_owns_enough(0, 1_000_000, SecondaryIssueThreshold::FreelyIssuable));
        assert!(!is_secondaryissue_owns_enough(u64::MAX, 1_000_000, SecondaryIssueThreshold::Forbidden));
    }

    #[test]
    fn attenuation_model_must_sum_to_supply() {
        let good = AttenuationModel { locked_amounts: vec![10, 20, 70], unlock_heights: vec![100, 200, 300] };
        assert!(good.is_valid_for_supply(100));
        let bad = AttenuationModel { locked_amounts: vec![10, 20], unlock_heights: vec![200, 100] };
        assert!(!bad.is_valid_for_supply(30));
    }
}
