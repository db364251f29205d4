//! Season clock
//!
//! One clock is built at process start and shared by handle. Reading the
//! date never waits on an advance in flight; advancing is serialized through
//! a single async lock so concurrent callers queue instead of overlapping.

use crate::types::SeasonDate;
use std::sync::{PoisonError, RwLock};
use tokio::sync::{Mutex, MutexGuard};

pub struct SeasonClock {
    current: RwLock<SeasonDate>,
    serial: Mutex<()>,
}

/// Exclusive right to move the clock, held for a whole advance + scoring pass
pub struct AdvanceGuard<'a> {
    clock: &'a SeasonClock,
    _serial: MutexGuard<'a, ()>,
}

impl SeasonClock {
    pub fn new(start: SeasonDate) -> Self {
        Self {
            current: RwLock::new(start),
            serial: Mutex::new(()),
        }
    }

    /// The last committed date
    pub fn current(&self) -> SeasonDate {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait for exclusive access to the clock
    pub async fn lock(&self) -> AdvanceGuard<'_> {
        AdvanceGuard {
            clock: self,
            _serial: self.serial.lock().await,
        }
    }

    /// Advance one month on its own, without a scoring pass
    pub async fn advance(&self) -> SeasonDate {
        self.lock().await.advance()
    }
}

impl AdvanceGuard<'_> {
    pub fn current(&self) -> SeasonDate {
        self.clock.current()
    }

    /// Commit the transition to the next month and return it
    pub fn advance(&mut self) -> SeasonDate {
        let mut current = self
            .clock
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = current.next();
        *current
    }
}
