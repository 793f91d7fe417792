//! Validation pipeline orchestrator
//!
//! [`TransactionValidator`] is created per transaction, mutated only by
//! [`TransactionValidator::validate`], and discarded once a verdict is
//! produced, a single-owner, non-shared lifecycle, the same shape a
//! per-call request-handler state struct gives its caller.

use std::collections::HashMap;

use crate::asset::{domain_of, is_forbidden, CertType};
use crate::basic::check_transaction_basic;
use crate::consensus_params::{COINBASE_MATURITY, MAX_MONEY, MIN_TX_FEE};
use crate::error::{ValidationError, ValidationFailure, ValidationResult};
use crate::features::check_transaction_features;
use crate::script::{ScriptChecker, VerifyFlags};
use crate::store::{ChainStore, FetchResult, PoolStore, SpendStatus};
use crate::tracing::{TraceEvent, Tracer};
use crate::types::{BusinessKind, Output, Transaction};

/// The outcome of a successful validation run: the indices of inputs whose
/// previous transaction was resolved from the mempool rather than the
/// confirmed chain
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Verdict {
    pub unconfirmed_inputs: Vec<usize>,
}

/// Per-run accumulated state. Single owner, mutated only by
/// [`TransactionValidator::connect_input`].
#[derive(Debug, Default)]
struct RunningAggregates {
    value_in: u64,
    asset_amount_in: u64,
    asset_certs_in: Vec<CertType>,
    old_symbol_in: Option<String>,
    business_kind_in: Option<BusinessKind>,
    unconfirmed_inputs: Vec<usize>,
}

/// Per-transaction validator. Constructed with the chain/pool stores and
/// the script checker as borrowed references; the dispatcher itself is
/// just `async`/`.await`, not a separate handle. `tracer` is optional: a
/// caller that wants structured [`TraceEvent`]s fanned out (in addition to
/// the `tracing` crate's textual logs this pipeline always emits) supplies
/// one via [`Self::with_tracer`]; otherwise events are simply not raised.
pub struct TransactionValidator<'a, C: ?Sized, P: ?Sized, S: ?Sized> {
    chain: &'a C,
    pool: &'a P,
    script_checker: &'a S,
    tracer: Option<&'a Tracer>,
}

impl<'a, C, P, S> TransactionValidator<'a, C, P, S>
where
    C: ChainStore + ?Sized,
    P: PoolStore + ?Sized,
    S: ScriptChecker + ?Sized,
{
    pub fn new(chain: &'a C, pool: &'a P, script_checker: &'a S) -> Self {
        Self { chain, pool, script_checker, tracer: None }
    }

    /// Attaches a [`Tracer`] (e.g. the one owned by a process-wide
    /// [`crate::tracing::Tracing`]) so pipeline-entry/exit, rejection and
    /// per-input events are fanned out to its registered handlers.
    pub fn with_tracer(mut self, tracer: &'a Tracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    fn trace(&self, event: TraceEvent) {
        if let Some(tracer) = self.tracer {
            tracer.trace(event);
        }
    }

    /// `start(handler)` from the external interface contract: `handler` is
    /// invoked exactly once with the verdict, mirroring the callback-driven
    /// entry point this validator's `.await`-based pipeline replaces.
    /// Callers that only want a `Result` should call [`Self::validate`]
    /// directly instead.
    pub async fn start<H>(&self, tx: &Transaction, handler: H)
    where
        H: FnOnce(Result<&Verdict, &ValidationFailure>),
    {
        let result = self.validate(tx).await;
        handler(result.as_ref());
    }

    /// Runs the full pipeline against `tx`.
    pub async fn validate(&self, tx: &Transaction) -> ValidationResult<Verdict> {
        tracing::debug!(tx_hash = %tx.hash, "validation started");
        self.trace(TraceEvent::ValidationStarted(tx.hash.to_string()));

        let result = self.validate_inner(tx).await;
        match &result {
            Ok(verdict) => {
                tracing::info!(
                    tx_hash = %tx.hash,
                    unconfirmed_inputs = verdict.unconfirmed_inputs.len(),
                    "validation accepted"
                );
                self.trace(TraceEvent::ValidationAccepted {
                    tx_hash: tx.hash.to_string(),
                    unconfirmed_inputs: verdict.unconfirmed_inputs.len(),
                });
            }
            Err(failure) => {
                tracing::warn!(tx_hash = %tx.hash, error = %failure.error, "validation rejected");
                self.trace(TraceEvent::ValidationRejected {
                    tx_hash: tx.hash.to_string(),
                    error: failure.error.to_string(),
                });
            }
        }
        result
    }

    async fn validate_inner(&self, tx: &Transaction) -> ValidationResult<Verdict> {
        if tx.is_coinbase() {
            return Err(ValidationFailure::new(ValidationError::CoinbaseTransaction));
        }

        check_transaction_basic(tx, self.chain).await?;
        check_transaction_features(tx, self.chain, self.pool).await?;

        if self.pool.is_in_pool(tx.hash) {
            return Err(ValidationFailure::new(ValidationError::Duplicate));
        }
        // BIP30's "spent dups ok" relaxation is intentionally not
        // implemented: any prior chain occurrence, success included,
        // is a duplicate.
        if self.chain.fetch_transaction(tx.hash).await.is_found() {
            return Err(ValidationFailure::new(ValidationError::Duplicate));
        }
        if self.pool.is_spent_in_pool(tx) {
            return Err(ValidationFailure::new(ValidationError::DoubleSpend));
        }

        let last_block_height = self
            .chain
            .fetch_last_height()
            .await
            .into_option()
            .ok_or_else(|| ValidationFailure::new(ValidationError::InputNotFound))?;

        let mut aggregates = RunningAggregates::default();

        for (index, input) in tx.inputs.iter().enumerate() {
            let (previous_tx, parent_height, from_pool) =
                match self.chain.fetch_transaction_index(input.previous_output.tx_hash).await {
                    FetchResult::Found(height) => {
                        let FetchResult::Found((previous_tx, _)) =
                            self.chain.fetch_transaction(input.previous_output.tx_hash).await
                        else {
                            return Err(ValidationFailure::at_input(ValidationError::InputNotFound, index));
                        };
                        (previous_tx, height, false)
                    }
                    FetchResult::NotFound => match self.pool.find(input.previous_output.tx_hash) {
                        Some(previous_tx) => (previous_tx, last_block_height, true),
                        None => return Err(ValidationFailure::at_input(ValidationError::InputNotFound, index)),
                    },
                };

            let previous_output = previous_tx
                .outputs
                .get(input.previous_output.index as usize)
                .ok_or_else(|| ValidationFailure::at_input(ValidationError::InputNotFound, index))?;

            self.connect_input(
                tx,
                index,
                previous_output,
                previous_tx.is_coinbase(),
                parent_height,
                last_block_height,
                &mut aggregates,
            )
            .map_err(|error| ValidationFailure::at_input(error.error, index))?;
            self.trace(TraceEvent::InputConnected { tx_hash: tx.hash.to_string(), input_index: index });

            match self.chain.fetch_spend(input.previous_output).await {
                FetchResult::Found(SpendStatus::Unspent) => {}
                _ => return Err(ValidationFailure::new(ValidationError::DoubleSpend)),
            }

            if from_pool {
                aggregates.unconfirmed_inputs.push(index);
            }
        }

        let total_output_value: u64 = tx.outputs.iter().map(|o| o.value).sum();
        let fee = aggregates
            .value_in
            .checked_sub(total_output_value)
            .ok_or_else(|| ValidationFailure::new(ValidationError::FeesOutOfRange))?;
        if fee < MIN_TX_FEE || aggregates.value_in > MAX_MONEY {
            return Err(ValidationFailure::new(ValidationError::FeesOutOfRange));
        }

        self.check_asset_conservation(tx, &aggregates)?;

        Ok(Verdict { unconfirmed_inputs: aggregates.unconfirmed_inputs })
    }

    /// Updates `aggregates` by the spent output's kind and verifies its
    /// spending script.
    #[allow(clippy::too_many_arguments)]
    fn connect_input(
        &self,
        tx: &Transaction,
        input_index: usize,
        previous_output: &Output,
        previous_is_coinbase: bool,
        parent_height: u64,
        last_block_height: u64,
        aggregates: &mut RunningAggregates,
    ) -> ValidationResult<()> {
        if previous_is_coinbase && last_block_height.saturating_sub(parent_height) < COINBASE_MATURITY {
            return Err(ValidationFailure::new(ValidationError::ValidateInputsFailed));
        }

        if let Some((symbol, amount)) = spent_asset_amount(previous_output) {
            if is_forbidden(symbol) {
                return Err(ValidationFailure::new(ValidationError::ValidateInputsFailed));
            }
            aggregates.asset_amount_in = aggregates
                .asset_amount_in
                .checked_add(amount)
                .ok_or_else(|| ValidationFailure::new(ValidationError::OutputValueOverflow))?;
            latch_symbol(aggregates, symbol)?;
            aggregates.business_kind_in = Some(if previous_output.is_asset_issue() || previous_output.is_asset_secondaryissue() {
                BusinessKind::AssetIssue
            } else {
                // Known anomaly: spending an asset-transfer
                // output latches DidTransfer, not AssetTransfer.
                BusinessKind::DidTransfer
            });
        } else if previous_output.is_any_asset_cert() {
            let cert = previous_output.asset_cert();
            if aggregates.asset_certs_in.contains(&cert.cert_type) {
                return Err(ValidationFailure::new(ValidationError::ValidateInputsFailed));
            }
            let domain_relaxed = aggregates.asset_certs_in.contains(&CertType::Domain);
            let expected_symbol = if domain_relaxed {
                aggregates.old_symbol_in.as_deref().and_then(domain_of).map(str::to_owned)
            } else {
                aggregates.old_symbol_in.clone()
            };
            if let Some(expected) = expected_symbol {
                if expected != cert.symbol {
                    return Err(ValidationFailure::new(ValidationError::ValidateInputsFailed));
                }
            }
            // A domain-relaxed cert's symbol is the sub-symbol authorized by
            // the domain cert, not `old_symbol_in` itself, so it must not be
            // latched through `latch_symbol`'s strict equality check above.
            if aggregates.old_symbol_in.is_none() {
                aggregates.old_symbol_in = Some(cert.symbol.clone());
            } else if !domain_relaxed {
                latch_symbol(aggregates, &cert.symbol)?;
            }
            aggregates.asset_certs_in.push(cert.cert_type);
            aggregates.business_kind_in = Some(BusinessKind::AssetCert);
        } else if previous_output.is_asset_mit() {
            let mit = previous_output.mit();
            latch_symbol(aggregates, &mit.symbol)?;
            aggregates.business_kind_in = Some(BusinessKind::AssetMit);
        } else if previous_output.is_did() {
            let did = previous_output.did();
            latch_symbol(aggregates, &did.symbol)?;
            aggregates.business_kind_in = Some(if previous_output.is_did_register() {
                BusinessKind::DidRegister
            } else {
                BusinessKind::DidTransfer
            });
        } else if previous_output.is_etp() && aggregates.business_kind_in.is_none() {
            aggregates.business_kind_in = Some(BusinessKind::Etp);
        }

        if !self
            .script_checker
            .check_consensus(&previous_output.script, tx, input_index, VerifyFlags::ALL_ENABLED)
        {
            return Err(ValidationFailure::new(ValidationError::ValidateInputsFailed));
        }

        aggregates.value_in = aggregates
            .value_in
            .checked_add(previous_output.value)
            .filter(|v| *v <= MAX_MONEY)
            .ok_or_else(|| ValidationFailure::new(ValidationError::OutputValueOverflow))?;

        Ok(())
    }

    /// Asset/cert/MIT/DID conservation checks, conditional on the latched
    /// `business_kind_in`.
    fn check_asset_conservation(&self, tx: &Transaction, aggregates: &RunningAggregates) -> ValidationResult<()> {
        let Some(symbol) = aggregates.old_symbol_in.as_deref() else { return Ok(()) };

        match aggregates.business_kind_in {
            Some(BusinessKind::AssetIssue) | Some(BusinessKind::AssetTransfer) => {
                let mut output_amount: u64 = 0;
                for output in &tx.outputs {
                    if output.is_asset_transfer() {
                        let (out_symbol, amount) = output.asset_transfer();
                        if out_symbol != symbol {
                            return Err(ValidationFailure::new(ValidationError::AssetSymbolNotMatch));
                        }
                        output_amount = output_amount
                            .checked_add(amount)
                            .ok_or_else(|| ValidationFailure::new(ValidationError::OutputValueOverflow))?;
                    }
                }
                if output_amount != aggregates.asset_amount_in {
                    return Err(ValidationFailure::new(ValidationError::AssetAmountNotEqual));
                }
            }
            Some(BusinessKind::AssetCert) => {
                let mut output_counts: HashMap<CertType, usize> = HashMap::new();
                for output in &tx.outputs {
                    if output.is_any_asset_cert() {
                        *output_counts.entry(output.asset_cert().cert_type).or_default() += 1;
                    }
                }
                let mut input_counts: HashMap<CertType, usize> = HashMap::new();
                for cert_type in &aggregates.asset_certs_in {
                    *input_counts.entry(*cert_type).or_default() += 1;
                }
                if input_counts != output_counts {
                    return Err(ValidationFailure::new(ValidationError::AssetCertError));
                }
            }
            Some(BusinessKind::AssetMit) => {
                let transfers = tx
                    .outputs
                    .iter()
                    .filter(|o| o.is_asset_mit_transfer() && o.mit().symbol == symbol)
                    .count();
                if transfers != 1 {
                    return Err(ValidationFailure::new(ValidationError::MitError));
                }
            }
            Some(BusinessKind::DidTransfer) => {
                let matches = tx.outputs.iter().any(|o| o.is_did_transfer() && o.did().symbol == symbol);
                if !matches {
                    return Err(ValidationFailure::new(ValidationError::DidSymbolNotMatch));
                }
            }
            _ => {}
        }

        Ok(())
    }
}

/// The (symbol, amount) an asset-carrying previous output contributes to
/// `asset_amount_in`, or `None` for non-asset outputs.
fn spent_asset_amount(output: &Output) -> Option<(&str, u64)> {
    if output.is_asset_issue() || output.is_asset_secondaryissue() {
        let detail = output.asset_detail();
        Some((&detail.symbol, detail.max_supply))
    } else if output.is_asset_transfer() {
        Some(output.asset_transfer())
    } else {
        None
    }
}

fn latch_symbol(aggregates: &mut RunningAggregates, symbol: &str) -> ValidationResult<()> {
    match &aggregates.old_symbol_in {
        Some(existing) if existing != symbol => Err(ValidationFailure::new(ValidationError::ValidateInputsFailed)),
        Some(_) => Ok(()),
        None => {
            aggregates.old_symbol_in = Some(symbol.to_owned());
            Ok(())
        }
    }
}
