use std::sync::Mutex;

use serde::Serialize;

use crate::error::AccountingFailure;

/// Running totals for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UsageTotals {
    pub total_tokens: u64,
    pub requests: u64,
}

/// Token and request counter shared by everything in a session.
///
/// Both fields change together under one lock. The counter is never reset;
/// drop it and create a new one to start over.
#[derive(Debug, Default)]
pub struct UsageCounter {
    totals: Mutex<UsageTotals>,
}

impl UsageCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one provider request that consumed `tokens`.
    pub fn record(&self, tokens: u64) -> Result<UsageTotals, AccountingFailure> {
        let mut totals = self
            .totals
            .lock()
            .map_err(|_| AccountingFailure("usage counter lock is poisoned".to_string()))?;
        totals.total_tokens = totals.total_tokens.saturating_add(tokens);
        totals.requests += 1;
        Ok(*totals)
    }

    pub fn snapshot(&self) -> Result<UsageTotals, AccountingFailure> {
        self.totals
            .lock()
            .map(|totals| *totals)
            .map_err(|_| AccountingFailure("usage counter lock is poisoned".to_string()))
    }

    #[cfg(test)]
    pub(crate) fn poison(self: &std::sync::Arc<Self>) {
        let counter = std::sync::Arc::clone(self);
        let _ = std::thread::spawn(move || {
            let _guard = counter.totals.lock();
            panic!("poisoning usage counter");
        })
        .join();
    }
}
