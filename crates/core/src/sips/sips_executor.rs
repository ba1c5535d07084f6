use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, error, info, warn};
use rust_decimal::Decimal;

use super::sips_model::Sip;
use super::sips_schedule::advance_schedule;
use super::sips_traits::SipRepositoryTrait;
use crate::constants::{DECIMAL_PRECISION, SIP_ORIGIN_NOTE};
use crate::errors::{Error, Result, SipExecutionError};
use crate::executions::{ExecutionRecord, ExecutionRepositoryTrait, NewExecutionRecord};
use crate::holdings::{merge, Holding, HoldingLocks, HoldingRepositoryTrait, NewHolding};
use crate::pricing::{PriceProviderTrait, PriceQuote};

/// Everything computed before the ledger is touched.
struct PreparedExecution {
    quote: PriceQuote,
    units: Decimal,
    next_execution_date: NaiveDate,
}

/// Runs a single SIP: price lookup, holding merge, audit record and schedule
/// advance.
///
/// Nothing is written until the price has been fetched and validated. A
/// failure up to that point leaves one failed execution record and no other
/// change. Ledger write failures after it are returned as-is.
pub struct SipExecutor {
    sip_repository: Arc<dyn SipRepositoryTrait>,
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    execution_repository: Arc<dyn ExecutionRepositoryTrait>,
    price_provider: Arc<dyn PriceProviderTrait>,
    holding_locks: HoldingLocks,
}

impl SipExecutor {
    pub fn new(
        sip_repository: Arc<dyn SipRepositoryTrait>,
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        execution_repository: Arc<dyn ExecutionRepositoryTrait>,
        price_provider: Arc<dyn PriceProviderTrait>,
        holding_locks: HoldingLocks,
    ) -> Self {
        Self {
            sip_repository,
            holding_repository,
            execution_repository,
            price_provider,
            holding_locks,
        }
    }

    /// Executes `sip` at `now` and returns the execution record with its
    /// holding reference filled in.
    pub async fn execute(&self, sip: &Sip, now: DateTime<Utc>) -> Result<ExecutionRecord> {
        debug!("Executing SIP {} for {}", sip.id, sip.scheme_name);

        let prepared = match self.prepare(sip).await {
            Ok(prepared) => prepared,
            Err(err) => return Err(self.record_failure(sip, err, now).await),
        };

        let record = self
            .execution_repository
            .create(NewExecutionRecord::executed(
                sip,
                prepared.quote.price,
                prepared.units,
                now,
            ))
            .await?;
        debug!("Execution record {} created for SIP {}", record.id, sip.id);

        let record = {
            let _guard = self
                .holding_locks
                .acquire(&sip.user_id, &sip.trading_symbol)
                .await;
            let holding = self
                .apply_to_holding(sip, &prepared.quote, prepared.units, now)
                .await?;
            self.execution_repository
                .attach_holding(&record.id, &holding.id)
                .await?
        };

        self.sip_repository
            .update_next_execution_date(&sip.id, prepared.next_execution_date)
            .await?;

        info!(
            "SIP {} executed: {} - {} units at NAV {}, next run {}",
            sip.id,
            sip.scheme_name,
            prepared.units.round_dp(DECIMAL_PRECISION),
            prepared.quote.price,
            prepared.next_execution_date
        );
        Ok(record)
    }

    /// Steps that may fail without leaving anything behind but the failure
    /// record: record sanity, price lookup, units and next run date.
    async fn prepare(&self, sip: &Sip) -> std::result::Result<PreparedExecution, SipExecutionError> {
        sip.validate_for_execution()?;

        let symbol = &sip.trading_symbol;
        let quote = match self.price_provider.get_price(symbol).await {
            Ok(Some(quote)) => quote,
            Ok(None) => return Err(SipExecutionError::PriceUnavailable(symbol.clone())),
            Err(e) => {
                return Err(SipExecutionError::PriceLookupFailed {
                    symbol: symbol.clone(),
                    message: e.to_string(),
                })
            }
        };
        debug!("NAV for {} is {} as of {}", symbol, quote.price, quote.as_of);

        let invalid_price = || SipExecutionError::InvalidPrice {
            symbol: symbol.clone(),
            price: quote.price,
        };
        if quote.price <= Decimal::ZERO {
            return Err(invalid_price());
        }
        let units = sip.amount.checked_div(quote.price).ok_or_else(invalid_price)?;

        let next_execution_date = advance_schedule(sip.next_execution_date, sip.frequency)
            .map_err(|e| SipExecutionError::Configuration(e.to_string()))?;

        Ok(PreparedExecution {
            quote,
            units,
            next_execution_date,
        })
    }

    /// Merges the purchase into the user's holding, opening one if needed.
    async fn apply_to_holding(
        &self,
        sip: &Sip,
        quote: &PriceQuote,
        units: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Holding> {
        match self
            .holding_repository
            .find_by_symbol(&sip.user_id, &sip.trading_symbol)?
        {
            Some(existing) => {
                let merged = merge(existing.quantity, existing.average_price, units, quote.price)?;
                debug!(
                    "Merging into holding {}: {} units, average {}",
                    existing.id,
                    merged.quantity.round_dp(DECIMAL_PRECISION),
                    merged.average_price.round_dp(DECIMAL_PRECISION)
                );
                self.holding_repository
                    .update_position(&existing.id, merged.quantity, merged.average_price)
                    .await
            }
            None => {
                debug!(
                    "Opening holding for user {} in {}",
                    sip.user_id, sip.trading_symbol
                );
                self.holding_repository
                    .create(NewHolding {
                        id: None,
                        user_id: sip.user_id.clone(),
                        trading_symbol: sip.trading_symbol.clone(),
                        amc: quote.amc.clone(),
                        scheme_name: sip.scheme_name.clone(),
                        scheme_type: quote.scheme_type.clone(),
                        plan: quote.plan.clone(),
                        quantity: units,
                        average_price: quote.price,
                        purchase_date: now,
                        origin_note: SIP_ORIGIN_NOTE.to_string(),
                    })
                    .await
            }
        }
    }

    /// Appends the failed execution record and hands back the error to return.
    /// When the record itself cannot be written, both errors are returned.
    async fn record_failure(
        &self,
        sip: &Sip,
        failure: SipExecutionError,
        now: DateTime<Utc>,
    ) -> Error {
        warn!("SIP {} ({}) failed: {}", sip.id, sip.scheme_name, failure);

        let record = NewExecutionRecord::failed(sip, failure.to_string(), now);
        match self.execution_repository.create(record).await {
            Ok(_) => Error::SipExecution(failure),
            Err(e) => {
                error!(
                    "Could not record failed execution for SIP {}: {}",
                    sip.id, e
                );
                Error::SipExecution(SipExecutionError::NotRecorded {
                    failure: Box::new(failure),
                    record_error: e.to_string(),
                })
            }
        }
    }
}
