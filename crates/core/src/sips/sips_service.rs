use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::{debug, info, warn};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::sips_executor::SipExecutor;
use super::sips_model::{BatchReport, DueSip, NewSip, Sip};
use super::sips_schedule::advance_schedule;
use super::sips_traits::{SipRepositoryTrait, SipServiceTrait};
use crate::errors::{Error, Result, SipExecutionError};
use crate::executions::{ExecutionRecord, ExecutionRepositoryTrait};
use crate::utils::time_utils::business_date_from_utc;

/// Service for managing SIPs and running the due-SIP batch.
pub struct SipService {
    sip_repository: Arc<dyn SipRepositoryTrait>,
    execution_repository: Arc<dyn ExecutionRepositoryTrait>,
    executor: Arc<SipExecutor>,
    business_tz: Tz,
    // Overlapping triggers (scheduler and HTTP) would otherwise both pick up
    // the same due SIPs.
    batch_lock: Arc<Mutex<()>>,
}

impl SipService {
    pub fn new(
        sip_repository: Arc<dyn SipRepositoryTrait>,
        execution_repository: Arc<dyn ExecutionRepositoryTrait>,
        executor: Arc<SipExecutor>,
        business_tz: Tz,
    ) -> Self {
        Self {
            sip_repository,
            execution_repository,
            executor,
            business_tz,
            batch_lock: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl SipServiceTrait for SipService {
    async fn create_sip(&self, new_sip: NewSip) -> Result<Sip> {
        new_sip.validate()?;
        let next_execution_date = advance_schedule(new_sip.start_date, new_sip.frequency)?;
        debug!(
            "Creating {} SIP for user {} in {}, first run {}",
            new_sip.frequency, new_sip.user_id, new_sip.trading_symbol, next_execution_date
        );
        self.sip_repository
            .create(new_sip, next_execution_date)
            .await
    }

    fn get_sip(&self, sip_id: &str) -> Result<Sip> {
        self.sip_repository.get_by_id(sip_id)
    }

    fn list_sips(&self, user_id: &str) -> Result<Vec<Sip>> {
        self.sip_repository.list_for_user(user_id)
    }

    fn get_executions(&self, user_id: &str, sip_id: Option<&str>) -> Result<Vec<ExecutionRecord>> {
        self.execution_repository.list(user_id, sip_id)
    }

    /// Runs every due SIP as of `now`.
    ///
    /// The batch itself runs on a spawned task. Dropping the returned future
    /// (a caller timeout) stops the batch at the next SIP boundary: the SIP in
    /// flight is finished and the rest stay due.
    async fn run_pending(&self, now: DateTime<Utc>) -> Result<BatchReport> {
        let running = self.batch_lock.clone().lock_owned().await;

        let as_of = business_date_from_utc(now, self.business_tz);
        info!("Running SIPs due on or before {}", as_of);

        let due = self.sip_repository.find_due(as_of)?;
        info!("Found {} SIPs due for execution", due.len());

        let abandoned = Arc::new(AtomicBool::new(false));
        let _abandon_on_drop = AbandonOnDrop(abandoned.clone());
        let batch = tokio::spawn(run_batch(
            self.executor.clone(),
            due,
            BatchReport::new(as_of),
            now,
            abandoned,
            running,
        ));

        let report = batch
            .await
            .map_err(|e| Error::Unexpected(format!("SIP batch task failed: {}", e)))?;
        info!(
            "SIP batch for {} finished: {} executed, {} failed",
            as_of, report.executed, report.failed
        );
        Ok(report)
    }
}

/// Flags the running batch as abandoned when the caller stops waiting on it.
struct AbandonOnDrop(Arc<AtomicBool>);

impl Drop for AbandonOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Executes `due` in order. Holds the batch lock until the last started SIP
/// has finished.
async fn run_batch(
    executor: Arc<SipExecutor>,
    due: Vec<DueSip>,
    mut report: BatchReport,
    now: DateTime<Utc>,
    abandoned: Arc<AtomicBool>,
    _running: OwnedMutexGuard<()>,
) -> BatchReport {
    let total = due.len();
    for (started, entry) in due.into_iter().enumerate() {
        if abandoned.load(Ordering::SeqCst) {
            warn!(
                "SIP batch for {} abandoned by its caller, {} SIPs left due",
                report.as_of,
                total - started
            );
            break;
        }
        match entry {
            Ok(sip) => match executor.execute(&sip, now).await {
                Ok(record) => report.record_success(&sip, record),
                Err(e) => {
                    warn!("Error executing SIP {}: {}", sip.id, e);
                    report.record_failure(&sip.id, &sip.scheme_name, e.to_string());
                }
            },
            Err(malformed) => {
                warn!("Skipping malformed {}", malformed);
                let error = SipExecutionError::Configuration(malformed.reason.clone());
                report.record_failure(&malformed.id, &malformed.scheme_name, error.to_string());
            }
        }
    }
    report
}
