//! Transaction, output and attachment value types.
//!
//! [`Output`] carries a tagged-variant [`Attachment`] instead of a flat
//! struct with an optional bolt-on field, so illegal accessors are
//! unrepresentable: you cannot call `.asset_detail()` on an output whose
//! attachment is `Message`.

use serde::{Deserialize, Serialize};

use crate::asset::{AssetCertData, AssetDetail, AttenuationModel, DidData, MitData};

/// Opaque 32-byte transaction hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(pub [u8; 32]);

impl TxHash {
    pub const fn null() -> Self {
        TxHash([0u8; 32])
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Reference to a previous transaction's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub tx_hash: TxHash,
    pub index: u32,
}

impl OutPoint {
    pub fn is_null(&self) -> bool {
        self.tx_hash.is_null()
    }
}

/// Opaque locking/unlocking script bytes, consumed only by [`crate::script`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Script(pub Vec<u8>);

/// A known output script pattern, independent of the attachment it carries.
/// `NonStandard` is the catch-all every other pattern excludes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptPattern {
    PayKeyHash,
    PayKeyHashWithLockHeight { lock_height: u32 },
    PayKeyHashWithAttenuationModel,
    PayScriptHash,
    NonStandard,
}

/// One transaction input: a previous-output reference plus the unlocking
/// script offered to satisfy it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub previous_output: OutPoint,
    pub script: Script,
    pub sequence: u32,
    /// Lock height the unlocking script claims to satisfy, when it encodes a
    /// sign-key-hash-with-lock-height pattern. `None` for a plain signature.
    pub claimed_lock_height: Option<u32>,
}

/// The tagged payload an output carries, selecting exactly one of its
/// eleven kinds. Every feature check matches on this instead of calling
/// kind predicates on a flat struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attachment {
    Etp,
    Message(Vec<u8>),
    AssetIssue(AssetDetail),
    AssetSecondaryIssue(AssetDetail),
    AssetTransfer { symbol: String, amount: u64 },
    AssetCert(AssetCertData),
    AssetCertIssue(AssetCertData),
    AssetMitRegister(MitData),
    AssetMitTransfer(MitData),
    DidRegister(DidData),
    DidTransfer(DidData),
}

/// Attachment version gate. `DidVerify` is the version under which
/// `from_did`/`to_did` are cross-checked against chain DID bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentVersion {
    Default,
    DidVerify,
}

/// One transaction output: value, locking script, script pattern, attachment,
/// and the optional DID linkage fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub value: u64,
    pub script: Script,
    pub script_pattern: ScriptPattern,
    /// Address the locking script pays to. Decoded once at construction so
    /// feature checks that reason about "this output's address" (etp and
    /// asset-transfer outputs, which carry no address in their attachment)
    /// never need to re-parse `script`.
    pub paid_address: String,
    pub attachment: Attachment,
    pub attachment_version: AttachmentVersion,
    pub from_did: Option<String>,
    pub to_did: Option<String>,
    pub attenuation_model: Option<AttenuationModel>,
}

impl Output {
    pub fn is_etp(&self) -> bool {
        matches!(self.attachment, Attachment::Etp)
    }
    pub fn is_message(&self) -> bool {
        matches!(self.attachment, Attachment::Message(_))
    }
    pub fn is_asset_issue(&self) -> bool {
        matches!(self.attachment, Attachment::AssetIssue(_))
    }
    pub fn is_asset_secondaryissue(&self) -> bool {
        matches!(self.attachment, Attachment::AssetSecondaryIssue(_))
    }
    pub fn is_asset_transfer(&self) -> bool {
        matches!(self.attachment, Attachment::AssetTransfer { .. })
    }
    pub fn is_asset(&self) -> bool {
        self.is_asset_issue() || self.is_asset_secondaryissue() || self.is_asset_transfer()
    }
    pub fn is_asset_cert(&self) -> bool {
        matches!(self.attachment, Attachment::AssetCert(_))
    }
    pub fn is_asset_cert_issue(&self) -> bool {
        matches!(self.attachment, Attachment::AssetCertIssue(_))
    }
    pub fn is_any_asset_cert(&self) -> bool {
        self.is_asset_cert() || self.is_asset_cert_issue()
    }
    pub fn is_asset_mit_register(&self) -> bool {
        matches!(self.attachment, Attachment::AssetMitRegister(_))
    }
    pub fn is_asset_mit_transfer(&self) -> bool {
        matches!(self.attachment, Attachment::AssetMitTransfer(_))
    }
    pub fn is_asset_mit(&self) -> bool {
        self.is_asset_mit_register() || self.is_asset_mit_transfer()
    }
    pub fn is_did_register(&self) -> bool {
        matches!(self.attachment, Attachment::DidRegister(_))
    }
    pub fn is_did_transfer(&self) -> bool {
        matches!(self.attachment, Attachment::DidTransfer(_))
    }
    pub fn is_did(&self) -> bool {
        self.is_did_register() || self.is_did_transfer()
    }

    /// Accessor for outputs carrying either issue or secondary-issue asset
    /// data. Panics if called on a non-asset-issue output: illegal access
    /// is a programming error in the caller.
    pub fn asset_detail(&self) -> &AssetDetail {
        match &self.attachment {
            Attachment::AssetIssue(detail) | Attachment::AssetSecondaryIssue(detail) => detail,
            other => panic!("asset_detail() called on non-asset-issue attachment {other:?}"),
        }
    }

    pub fn asset_transfer(&self) -> (&str, u64) {
        match &self.attachment {
            Attachment::AssetTransfer { symbol, amount } => (symbol.as_str(), *amount),
            other => panic!("asset_transfer() called on non-transfer attachment {other:?}"),
        }
    }

    pub fn asset_cert(&self) -> &AssetCertData {
        match &self.attachment {
            Attachment::AssetCert(cert) | Attachment::AssetCertIssue(cert) => cert,
            other => panic!("asset_cert() called on non-cert attachment {other:?}"),
        }
    }

    pub fn mit(&self) -> &MitData {
        match &self.attachment {
            Attachment::AssetMitRegister(mit) | Attachment::AssetMitTransfer(mit) => mit,
            other => panic!("mit() called on non-MIT attachment {other:?}"),
        }
    }

    pub fn did(&self) -> &DidData {
        match &self.attachment {
            Attachment::DidRegister(did) | Attachment::DidTransfer(did) => did,
            other => panic!("did() called on non-DID attachment {other:?}"),
        }
    }

    /// Address this output is attributed to: the attachment's own address
    /// field for kinds that declare one, otherwise the script's pay-to
    /// address (etp, message, asset-transfer).
    pub fn address(&self) -> Option<&str> {
        match &self.attachment {
            Attachment::AssetIssue(a) | Attachment::AssetSecondaryIssue(a) => Some(&a.issuer_address),
            Attachment::AssetCert(c) | Attachment::AssetCertIssue(c) => Some(&c.address),
            Attachment::AssetMitRegister(m) | Attachment::AssetMitTransfer(m) => Some(&m.address),
            Attachment::DidRegister(d) | Attachment::DidTransfer(d) => Some(&d.address),
            _ => Some(&self.paid_address),
        }
    }
}

/// The latched business category of a validation run. Preserved verbatim,
/// including the documented anomaly that spending an asset-transfer output
/// latches `DidTransfer` rather than `AssetTransfer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessKind {
    Etp,
    AssetIssue,
    AssetTransfer,
    AssetCert,
    AssetMit,
    DidRegister,
    DidTransfer,
}

/// A candidate transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: TxHash,
    pub version: u32,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
}

impl Transaction {
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
    }

    /// Conservative stand-in for serialized size: header overhead plus a
    /// fixed per-input/output cost. The validator only needs this to be
    /// monotonic in (inputs, outputs, script length, attachment payload),
    /// which this satisfies.
    pub fn serialized_size(&self) -> usize {
        let mut size = 12usize;
        for input in &self.inputs {
            size += 32 + 4 + 4 + input.script.0.len();
        }
        for output in &self.outputs {
            size += 8 + output.script.0.len() + attachment_payload_size(&output.attachment);
        }
        size
    }
}

fn attachment_payload_size(attachment: &Attachment) -> usize {
    match attachment {
        Attachment::Etp => 0,
        Attachment::Message(bytes) => bytes.len(),
        Attachment::AssetIssue(a) | Attachment::AssetSecondaryIssue(a) => {
            a.symbol.len() + a.issuer_address.len() + a.issuer_did.len() + 17
        }
        Attachment::AssetTransfer { symbol, .. } => symbol.len() + 8,
        Attachment::AssetCert(c) | Attachment::AssetCertIssue(c) => {
            c.symbol.len() + c.owner_did.len() + c.address.len() + 1
        }
        Attachment::AssetMitRegister(m) | Attachment::AssetMitTransfer(m) => m.symbol.len() + m.address.len(),
        Attachment::DidRegister(d) | Attachment::DidTransfer(d) => d.symbol.len() + d.address.len(),
    }
}
