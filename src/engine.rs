//! Engine facade: one isolated instance of the directory, ticket manager,
//! and session accumulator wired together.
//!
//! No process-wide singletons — construct as many engines as you need
//! (one per test, one per server).

use std::sync::Arc;

use crate::directory::FacilityDirectory;
use crate::oracle::{AdvisoryOracle, NoopOracle};
use crate::sessions::SessionAccumulator;
use crate::tickets::{Notifier, TicketManager, TracingNotifier};

pub struct Engine {
    pub directory: Arc<FacilityDirectory>,
    pub tickets: TicketManager,
    pub sessions: SessionAccumulator,
}

impl Engine {
    pub fn new(oracle: Arc<dyn AdvisoryOracle>, notifier: Arc<dyn Notifier>) -> Self {
        let directory = Arc::new(FacilityDirectory::new());
        Self {
            tickets: TicketManager::new(Arc::clone(&directory), notifier),
            sessions: SessionAccumulator::new(oracle),
            directory,
        }
    }

    /// Deterministic-only engine: no external oracle, log-only notifier.
    pub fn deterministic() -> Self {
        Self::new(Arc::new(NoopOracle), Arc::new(TracingNotifier))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::deterministic()
    }
}
