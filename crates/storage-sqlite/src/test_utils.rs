//! Temp-file database setup for repository tests.

use std::sync::Arc;

use diesel::RunQueryDsl;
use tempfile::{tempdir, TempDir};

use crate::db::{create_pool, get_connection, init, run_migrations, write_actor::spawn_writer};
use crate::db::{DbPool, WriteHandle};
use crate::pricing::MutualFundPriceDB;
use crate::schema::mutual_fund_prices;

/// Keep the returned `TempDir` alive for as long as the pool is used.
pub(crate) fn setup_db() -> (Arc<DbPool>, WriteHandle, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_path = init(&db_path.to_string_lossy()).expect("Failed to init database");

    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());
    (pool, writer, temp_dir)
}

pub(crate) fn insert_price(pool: &DbPool, trading_symbol: &str, price: &str) {
    let mut conn = get_connection(pool).expect("Failed to get connection");
    diesel::insert_into(mutual_fund_prices::table)
        .values(&MutualFundPriceDB {
            trading_symbol: trading_symbol.to_string(),
            name: "Axis Bluechip Fund - Direct Growth".to_string(),
            amc: "Axis Mutual Fund".to_string(),
            scheme_type: "Equity".to_string(),
            plan: "Direct".to_string(),
            minimum_purchase_amount: Some("500".to_string()),
            last_price: price.to_string(),
            last_price_date: "2024-02-29".to_string(),
        })
        .execute(&mut conn)
        .expect("Failed to insert price");
}
