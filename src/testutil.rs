//! In-memory chain/pool fakes shared by unit and integration tests. Not
//! part of the public API surface: compiled only under `#[cfg(test)]`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::asset::{CertType, DidData, MitData};
use crate::store::{ChainSettings, ChainStore, FetchResult, PoolStore, SpendStatus};
use crate::types::{Attachment, AttachmentVersion, Input, OutPoint, Output, Script, ScriptPattern, Transaction, TxHash};

/// A confirmed transaction plus the height it confirmed at.
#[derive(Clone)]
struct Confirmed {
    tx: Transaction,
    height: u64,
}

/// An in-memory `ChainStore` double. All mutation happens through the
/// `with_*` builder methods before a test hands it to the validator.
#[derive(Default)]
pub struct FakeChain {
    transactions: Mutex<HashMap<[u8; 32], Confirmed>>,
    spends: Mutex<HashMap<(TxHash, u32), SpendStatus>>,
    last_height: Mutex<u64>,
    settings: Mutex<ChainSettings>,
    asset_volumes: Mutex<HashMap<String, u64>>,
    existing_assets: Mutex<Vec<String>>,
    existing_certs: Mutex<Vec<(String, CertType)>>,
    existing_mits: Mutex<HashMap<String, MitData>>,
    existing_dids: Mutex<HashMap<String, DidData>>,
    address_to_did: Mutex<HashMap<String, String>>,
}

impl FakeChain {
    pub fn with_last_height(self, height: u64) -> Self {
        *self.last_height.lock().unwrap() = height;
        self
    }

    pub fn with_testnet_rules(self, use_testnet_rules: bool) -> Self {
        self.settings.lock().unwrap().use_testnet_rules = use_testnet_rules;
        self
    }

    pub fn with_confirmed(self, tx: Transaction, height: u64) -> Self {
        self.transactions.lock().unwrap().insert(tx.hash.0, Confirmed { tx, height });
        self
    }

    pub fn with_spend(self, outpoint: OutPoint, status: SpendStatus) -> Self {
        self.spends.lock().unwrap().insert((outpoint.tx_hash, outpoint.index), status);
        self
    }

    pub fn with_asset_volume(self, symbol: &str, volume: u64) -> Self {
        self.asset_volumes.lock().unwrap().insert(symbol.to_owned(), volume);
        self
    }

    pub fn with_existing_asset(self, symbol: &str) -> Self {
        self.existing_assets.lock().unwrap().push(symbol.to_owned());
        self
    }

    pub fn with_did(self, symbol: &str, address: &str) -> Self {
        self.existing_dids
            .lock()
            .unwrap()
            .insert(symbol.to_owned(), DidData { symbol: symbol.to_owned(), address: address.to_owned() });
        self.address_to_did.lock().unwrap().insert(address.to_owned(), symbol.to_owned());
        self
    }
}

#[async_trait]
impl ChainStore for FakeChain {
    async fn fetch_transaction(&self, hash: TxHash) -> FetchResult<(Transaction, u64)> {
        match self.transactions.lock().unwrap().get(&hash.0) {
            Some(confirmed) => FetchResult::Found((confirmed.tx.clone(), confirmed.height)),
            None => FetchResult::NotFound,
        }
    }

    async fn fetch_transaction_index(&self, hash: TxHash) -> FetchResult<u64> {
        match self.transactions.lock().unwrap().get(&hash.0) {
            Some(confirmed) => FetchResult::Found(confirmed.height),
            None => FetchResult::NotFound,
        }
    }

    async fn fetch_last_height(&self) -> FetchResult<u64> {
        FetchResult::Found(*self.last_height.lock().unwrap())
    }

    async fn fetch_spend(&self, outpoint: OutPoint) -> FetchResult<SpendStatus> {
        match self.spends.lock().unwrap().get(&(outpoint.tx_hash, outpoint.index)) {
            Some(status) => FetchResult::Found(*status),
            None => FetchResult::Found(SpendStatus::Unspent),
        }
    }

    fn is_asset_exist(&self, symbol: &str) -> bool {
        self.existing_assets.lock().unwrap().iter().any(|s| s == symbol)
    }

    fn is_did_exist(&self, symbol: &str) -> bool {
        self.existing_dids.lock().unwrap().contains_key(symbol)
    }

    fn is_asset_cert_exist(&self, symbol: &str, cert_type: CertType) -> bool {
        self.existing_certs.lock().unwrap().iter().any(|(s, t)| s == symbol && *t == cert_type)
    }

    fn get_registered_mit(&self, symbol: &str) -> Option<MitData> {
        self.existing_mits.lock().unwrap().get(symbol).cloned()
    }

    fn get_registered_did(&self, symbol: &str) -> Option<DidData> {
        self.existing_dids.lock().unwrap().get(symbol).cloned()
    }

    fn get_did_from_address(&self, address: &str) -> Option<String> {
        self.address_to_did.lock().unwrap().get(address).cloned()
    }

    fn get_asset_volume(&self, symbol: &str) -> u64 {
        *self.asset_volumes.lock().unwrap().get(symbol).unwrap_or(&0)
    }

    fn is_valid_address(&self, address: &str) -> bool {
        address.starts_with("addr-")
    }

    fn chain_settings(&self) -> ChainSettings {
        *self.settings.lock().unwrap()
    }

    fn get_last_height(&self) -> u64 {
        *self.last_height.lock().unwrap()
    }
}

/// An in-memory `PoolStore` double, empty unless seeded.
#[derive(Default)]
pub struct FakePool {
    transactions: Mutex<HashMap<[u8; 32], Transaction>>,
    spent_outpoints: Mutex<Vec<OutPoint>>,
}

impl FakePool {
    pub fn with_transaction(self, tx: Transaction) -> Self {
        self.transactions.lock().unwrap().insert(tx.hash.0, tx);
        self
    }

    pub fn with_spent(self, outpoint: OutPoint) -> Self {
        self.spent_outpoints.lock().unwrap().push(outpoint);
        self
    }
}

impl PoolStore for FakePool {
    fn is_in_pool(&self, hash: TxHash) -> bool {
        self.transactions.lock().unwrap().contains_key(&hash.0)
    }

    fn find(&self, hash: TxHash) -> Option<Transaction> {
        self.transactions.lock().unwrap().get(&hash.0).cloned()
    }

    fn is_spent_in_pool(&self, tx: &Transaction) -> bool {
        let spent = self.spent_outpoints.lock().unwrap();
        tx.inputs.iter().any(|input| spent.contains(&input.previous_output))
    }
}

pub fn sample_etp_input(previous_hash: TxHash, index: u32) -> Input {
    Input {
        previous_output: OutPoint { tx_hash: previous_hash, index },
        script: Script(vec![0x01, 0x02]),
        sequence: 0xffff_ffff,
        claimed_lock_height: None,
    }
}

pub fn sample_etp_output(address: &str, value: u64) -> Output {
    Output {
        value,
        script: Script(vec![0x76, 0xa9]),
        script_pattern: ScriptPattern::PayKeyHash,
        paid_address: address.to_owned(),
        attachment: Attachment::Etp,
        attachment_version: AttachmentVersion::Default,
        from_did: None,
        to_did: None,
        attenuation_model: None,
    }
}
