//! Process-wide single-session slot
//!
//! At most one capture session may be live at a time. A session holds a
//! [`SlotLease`] from creation until it terminates; while the lease exists a
//! second trigger is rejected with [`OverlayError::SessionAlreadyActive`].

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::debug;

use crate::{
    error::{OverlayError, OverlayResult},
    model::SessionId,
};

static GLOBAL_SLOT: Lazy<SessionSlot> = Lazy::new(SessionSlot::new);

/// Optional single slot holding the live session id
#[derive(Debug, Clone, Default)]
pub struct SessionSlot {
    occupant: Arc<Mutex<Option<SessionId>>>,
}

impl SessionSlot {
    /// Creates an independent slot (used by tests and embedded hosts)
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot shared by every controller in the process
    pub fn global() -> &'static SessionSlot {
        &GLOBAL_SLOT
    }

    /// Claims the slot for `id`, rejecting if another session holds it
    pub fn acquire(&self, id: SessionId) -> OverlayResult<SlotLease> {
        let mut occupant = self.occupant.lock();
        if let Some(active) = *occupant {
            debug!(%active, rejected = %id, "session slot occupied");
            return Err(OverlayError::SessionAlreadyActive { active });
        }
        *occupant = Some(id);
        Ok(SlotLease {
            slot: self.clone(),
            id,
        })
    }

    /// The session currently holding the slot, if any
    pub fn active(&self) -> Option<SessionId> {
        *self.occupant.lock()
    }

    pub fn is_occupied(&self) -> bool {
        self.active().is_some()
    }
}

/// Proof of slot ownership; frees the slot when dropped
#[derive(Debug)]
pub struct SlotLease {
    slot: SessionSlot,
    id:   SessionId,
}

impl SlotLease {
    pub fn id(&self) -> SessionId {
        self.id
    }
}

impl Drop for SlotLease {
    fn drop(&mut self) {
        let mut occupant = self.slot.occupant.lock();
        if *occupant == Some(self.id) {
            *occupant = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected() {
        let slot = SessionSlot::new();
        let first = SessionId::next();
        let _lease = slot.acquire(first).unwrap();

        let err = slot.acquire(SessionId::next()).unwrap_err();
        assert!(matches!(err, OverlayError::SessionAlreadyActive { active } if active == first));
    }

    #[test]
    fn test_dropping_lease_frees_slot() {
        let slot = SessionSlot::new();
        let lease = slot.acquire(SessionId::next()).unwrap();
        assert!(slot.is_occupied());

        drop(lease);
        assert!(!slot.is_occupied());
        assert!(slot.acquire(SessionId::next()).is_ok());
    }

    #[test]
    fn test_clones_share_occupancy() {
        let slot = SessionSlot::new();
        let other = slot.clone();
        let id = SessionId::next();
        let _lease = slot.acquire(id).unwrap();

        assert_eq!(other.active(), Some(id));
    }
}
