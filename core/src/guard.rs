//! One-shot gate for write flows.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::SplitterError;

/// Set while a write of one kind is being submitted and tracked.
#[derive(Debug, Default)]
pub(crate) struct InFlight(AtomicBool);

impl InFlight {
    /// Claim the gate, or fail with [`SplitterError::Busy`] if it is held.
    pub(crate) fn try_begin(
        &self,
        action: &'static str,
    ) -> Result<InFlightGuard<'_>, SplitterError> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SplitterError::Busy(action))?;
        Ok(InFlightGuard(&self.0))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Releases the gate on drop, including on early return and cancellation.
pub(crate) struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
