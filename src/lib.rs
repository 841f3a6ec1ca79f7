#![doc(test(attr(deny(warnings))))]

//! Tracker Core provides the occurrence engine, period reporting, and
//! persistence primitives behind a personal finance tracker.

pub mod config;
pub mod core;
pub mod domain;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tracker Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
