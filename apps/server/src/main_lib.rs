use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use sipledger_core::{
    holdings::{HoldingLocks, HoldingService, HoldingServiceTrait},
    sips::{SipExecutor, SipService, SipServiceTrait},
};
use sipledger_storage_sqlite::{
    db::{self, write_actor},
    executions::ExecutionRepository,
    holdings::HoldingRepository,
    pricing::PriceRepository,
    sips::SipRepository,
};

pub struct AppState {
    pub sip_service: Arc<dyn SipServiceTrait>,
    pub holding_service: Arc<dyn HoldingServiceTrait>,
}

/// Installs the global subscriber. `log` records from the library crates are
/// forwarded through the subscriber's log bridge.
pub fn init_tracing() {
    let log_format = std::env::var("SIP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let sip_repository = Arc::new(SipRepository::new(pool.clone(), writer.clone()));
    let holding_repository = Arc::new(HoldingRepository::new(pool.clone(), writer.clone()));
    let execution_repository = Arc::new(ExecutionRepository::new(pool.clone(), writer.clone()));
    let price_repository = Arc::new(PriceRepository::new(pool.clone()));

    let executor = Arc::new(SipExecutor::new(
        sip_repository.clone(),
        holding_repository.clone(),
        execution_repository.clone(),
        price_repository,
        HoldingLocks::new(),
    ));
    let sip_service: Arc<dyn SipServiceTrait> = Arc::new(SipService::new(
        sip_repository,
        execution_repository,
        executor,
        config.business_tz,
    ));
    let holding_service: Arc<dyn HoldingServiceTrait> =
        Arc::new(HoldingService::new(holding_repository));

    Ok(Arc::new(AppState {
        sip_service,
        holding_service,
    }))
}
