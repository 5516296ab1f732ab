//! Test doubles shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use perfumeria_backend::error::{AppError, AppResult};
use perfumeria_backend::external::RateProvider;
use rust_decimal::Decimal;
use shared::RateTable;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn rates(pairs: &[(&str, &str)]) -> RateTable {
    pairs
        .iter()
        .map(|(code, rate)| (code.to_string(), dec(rate)))
        .collect()
}

/// Provider that counts fetches and can be switched to fail
pub struct FakeProvider {
    calls: AtomicUsize,
    failing: AtomicBool,
    table: Mutex<RateTable>,
}

impl FakeProvider {
    pub fn new(table: RateTable) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            table: Mutex::new(table),
        }
    }

    pub fn failing() -> Self {
        let provider = Self::new(RateTable::new());
        provider.set_failing(true);
        provider
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_table(&self, table: RateTable) {
        *self.table.lock().unwrap() = table;
    }
}

#[async_trait]
impl RateProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn fetch_rates(&self) -> AppResult<RateTable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::rate_provider("fake", "upstream down"));
        }
        Ok(self.table.lock().unwrap().clone())
    }
}
