//! Non-blocking admission gates built on a Tokio semaphore.
//!
//! A gate bounds how many callers may be inside an entry point at once.
//! Unlike a rate limiter it never makes a caller wait: when every permit
//! is held, [`AdmissionGate::try_enter`] fails on the spot and the caller is
//! expected to answer its own client with "too many requests".

use crate::{RateLimitError, RateLimitErrorKind};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, instrument, warn};

/// Fixed-capacity permit pool guarding one public entry point.
///
/// Cloning a gate shares its permit pool. Separate gates never interact,
/// even when they guard entry points that feed the same worker.
///
/// # Example
///
/// ```
/// use cadence_rate_limit::AdmissionGate;
///
/// let gate = AdmissionGate::new("analysis", 1).unwrap();
///
/// let permit = gate.try_enter().unwrap();
/// assert!(gate.try_enter().is_err()); // refused, not queued
///
/// drop(permit);
/// assert!(gate.try_enter().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    name: Arc<str>,
    capacity: usize,
    permits: Arc<Semaphore>,
}

impl AdmissionGate {
    /// Create a gate holding `capacity` permits.
    ///
    /// # Errors
    ///
    /// A zero-capacity gate would refuse every caller, and a capacity above
    /// [`Semaphore::MAX_PERMITS`] cannot be represented; both are rejected.
    #[instrument]
    pub fn new(name: &str, capacity: usize) -> Result<Self, RateLimitError> {
        if capacity == 0 || capacity > Semaphore::MAX_PERMITS {
            return Err(RateLimitError::new(RateLimitErrorKind::InvalidCapacity(
                format!("gate '{}' cannot hold {} permits", name, capacity),
            )));
        }

        debug!(capacity, "Creating admission gate");
        Ok(Self {
            name: Arc::from(name),
            capacity,
            permits: Arc::new(Semaphore::new(capacity)),
        })
    }

    /// Try to take a permit without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitErrorKind::Saturated`] immediately when every
    /// permit is held.
    pub fn try_enter(&self) -> Result<AdmissionPermit, RateLimitError> {
        match self.permits.clone().try_acquire_owned() {
            Ok(permit) => {
                debug!(gate = %self.name, available = self.available(), "Admitted");
                Ok(AdmissionPermit {
                    gate: Arc::clone(&self.name),
                    _permit: permit,
                })
            }
            Err(_) => {
                warn!(gate = %self.name, capacity = self.capacity, "Admission refused");
                Err(RateLimitError::new(RateLimitErrorKind::Saturated {
                    gate: self.name.to_string(),
                    capacity: self.capacity,
                }))
            }
        }
    }

    /// Gate name, used in logs and metrics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total permits.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits not currently held.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

/// RAII permit for an [`AdmissionGate`].
///
/// The permit returns to its gate exactly once: when it is dropped or passed
/// to [`AdmissionPermit::exit`]. Holding it across every exit path of a
/// handler (success, error, timeout, panic unwinding) is what guarantees the
/// release.
#[derive(Debug)]
pub struct AdmissionPermit {
    gate: Arc<str>,
    _permit: OwnedSemaphorePermit,
}

impl AdmissionPermit {
    /// Name of the gate this permit belongs to.
    pub fn gate(&self) -> &str {
        &self.gate
    }

    /// Release the permit explicitly.
    pub fn exit(self) {
        debug!(gate = %self.gate, "Permit released");
    }
}
