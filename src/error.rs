//! Error types for the transaction admission validator.
//!
//! Every rule in the pipeline fails with exactly one of these variants, the
//! same way `configuration::error::ConfigError` gives every configuration
//! failure a single named cause instead of a bag of strings.

use thiserror::Error;

/// A single rule violation. The pipeline halts at the first one it hits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("coinbase transactions cannot be submitted for mempool admission")]
    CoinbaseTransaction,
    #[error("output locking script is not a standard pattern")]
    ScriptNotStandard,
    #[error("transaction is not a standard transaction")]
    IsNotStandard,
    #[error("transaction already present in mempool or confirmed chain")]
    Duplicate,
    #[error("transaction double-spends an already-spent output")]
    DoubleSpend,
    #[error("referenced previous output was not found on chain or in the pool")]
    InputNotFound,
    #[error("input failed connection validation")]
    ValidateInputsFailed,
    #[error("transaction fee is below the minimum or exceeds the maximum money supply")]
    FeesOutOfRange,
    #[error("transaction has no inputs or no outputs")]
    EmptyTransaction,
    #[error("serialized transaction exceeds the maximum size")]
    SizeLimits,
    #[error("an output value or the running output total overflows or exceeds max_money")]
    OutputValueOverflow,
    #[error("transaction version is not supported")]
    TransactionVersionError,
    #[error("nova feature transactions are not yet activated at this chain height")]
    NovaFeatureNotActivated,
    #[error("invalid coinbase script size")]
    InvalidCoinbaseScriptSize,
    #[error("non-coinbase input references a null previous output")]
    PreviousOutputNull,
    #[error("input script lock height is invalid for the referenced previous output")]
    InvalidInputScriptLockHeight,
    #[error("output script lock height is not an allowed value")]
    InvalidOutputScriptLockHeight,
    #[error("attenuation model parameters are invalid")]
    AttenuationModelParamError,
    #[error("output attachment is invalid")]
    AttachmentInvalid,
    #[error("asset symbol is invalid")]
    AssetSymbolInvalid,
    #[error("DID symbol is invalid")]
    DidSymbolInvalid,
    #[error("MIT symbol is invalid")]
    MitSymbolInvalid,
    #[error("asset symbol already exists on chain")]
    AssetExist,
    #[error("asset certificate already exists on chain")]
    AssetCertExist,
    #[error("MIT symbol already exists on chain")]
    MitExist,
    #[error("DID symbol already exists on chain")]
    DidExist,
    #[error("DID symbol does not exist on chain")]
    DidNotExist,
    #[error("address already has a registered DID")]
    AddressRegisteredDid,
    #[error("asset certificate output requires an owner DID that does not exist")]
    DidAddressNeeded,
    #[error("transaction may carry at most one DID register or transfer output")]
    DidMultiTypeExist,
    #[error("DID transaction does not have the required input shape")]
    DidInputError,
    #[error("DID-bound address does not match the expected address")]
    DidAddressNotMatch,
    #[error("DID symbol does not match the expected symbol")]
    DidSymbolNotMatch,
    #[error("asset amount in does not equal asset amount out")]
    AssetAmountNotEqual,
    #[error("asset symbol in does not match asset symbol out")]
    AssetSymbolNotMatch,
    #[error("asset certificate rule violated")]
    AssetCertError,
    #[error("a required asset certificate was not provided")]
    AssetCertNotProvided,
    #[error("asset certificate issuance rule violated")]
    AssetCertIssueError,
    #[error("asset issuance rule violated")]
    AssetIssueError,
    #[error("asset secondary issuance rule violated")]
    AssetSecondaryIssueError,
    #[error("asset secondary-issue threshold value is invalid")]
    AssetSecondaryIssueThresholdInvalid,
    #[error("secondary issuer does not own enough of the existing asset volume")]
    AssetSecondaryIssueShareNotEnough,
    #[error("asset issuer DID does not match the attachment's to_did")]
    AssetDidRegisterNotMatch,
    #[error("MIT rule violated")]
    MitError,
    #[error("MIT registration rule violated")]
    MitRegisterError,
}

/// The non-success outcome of a validation run: the rule that failed, plus
/// the input indices it is attributable to (empty when the failure is not
/// specific to one or more inputs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub error: ValidationError,
    pub input_indices: Vec<usize>,
}

impl ValidationFailure {
    pub fn new(error: ValidationError) -> Self {
        Self { error, input_indices: Vec::new() }
    }

    pub fn at_input(error: ValidationError, index: usize) -> Self {
        Self { error, input_indices: vec![index] }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.input_indices.is_empty() {
            write!(f, "{}", self.error)
        } else {
            write!(f, "{} (inputs {:?})", self.error, self.input_indices)
        }
    }
}

impl std::error::Error for ValidationFailure {}

pub type ValidationResult<T> = Result<T, ValidationFailure>;
