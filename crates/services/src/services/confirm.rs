//! Confirmation dialog guarding destructive and state-changing row actions.
//!
//! `Closed -> Open(target) -> Mutating -> Closed`, or `Open -> Closed` on cancel.
//! While `Mutating`, both buttons are disabled and every transition except
//! [`ConfirmModal::finish`] is rejected. A finished mutation always lands in
//! `Closed`, success or not, so a stale target can never be resubmitted. An
//! [`InFlight`] guard from [`ConfirmModal::start`] finishes on drop, which also
//! covers a caller that abandons the mutation part way.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    Delete,
    /// Partial update, e.g. `{ "isActive": false }`.
    Update(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalState<T> {
    Closed,
    Open { target: T, action: PendingAction },
    Mutating { target: T, action: PendingAction },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("no confirmation is open")]
    NotOpen,
    #[error("a change is already being applied")]
    Busy,
}

#[derive(Debug, Clone)]
pub struct ConfirmModal<T> {
    state: ModalState<T>,
}

impl<T> Default for ConfirmModal<T> {
    fn default() -> Self {
        Self {
            state: ModalState::Closed,
        }
    }
}

impl<T: Clone> ConfirmModal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState<T> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, ModalState::Closed)
    }

    /// A mutation is in flight; confirm and cancel are disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, ModalState::Mutating { .. })
    }

    pub fn target(&self) -> Option<&T> {
        match &self.state {
            ModalState::Closed => None,
            ModalState::Open { target, .. } | ModalState::Mutating { target, .. } => Some(target),
        }
    }

    pub fn action(&self) -> Option<&PendingAction> {
        match &self.state {
            ModalState::Closed => None,
            ModalState::Open { action, .. } | ModalState::Mutating { action, .. } => Some(action),
        }
    }

    /// Select `target` for `action`. Re-selecting while open replaces the target.
    pub fn open(&mut self, target: T, action: PendingAction) -> Result<(), ModalError> {
        if self.is_busy() {
            return Err(ModalError::Busy);
        }
        self.state = ModalState::Open { target, action };
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), ModalError> {
        if self.is_busy() {
            return Err(ModalError::Busy);
        }
        self.state = ModalState::Closed;
        Ok(())
    }

    /// Confirm: move to `Mutating` and hand back what to apply.
    pub fn begin(&mut self) -> Result<(T, PendingAction), ModalError> {
        match &self.state {
            ModalState::Closed => Err(ModalError::NotOpen),
            ModalState::Mutating { .. } => Err(ModalError::Busy),
            ModalState::Open { target, action } => {
                let pending = (target.clone(), action.clone());
                self.state = ModalState::Mutating {
                    target: pending.0.clone(),
                    action: pending.1.clone(),
                };
                Ok(pending)
            }
        }
    }

    /// Like [`begin`](Self::begin), but the modal closes when the returned
    /// guard is dropped.
    pub fn start(&mut self) -> Result<InFlight<'_, T>, ModalError> {
        let (target, action) = self.begin()?;
        Ok(InFlight {
            modal: self,
            target,
            action,
        })
    }

    /// The mutation settled; clear the pending target whatever the outcome.
    pub fn finish(&mut self) {
        self.state = ModalState::Closed;
    }
}

/// A confirmed action being applied. Dropping it closes the modal.
pub struct InFlight<'a, T: Clone> {
    modal: &'a mut ConfirmModal<T>,
    target: T,
    action: PendingAction,
}

impl<T: Clone> InFlight<'_, T> {
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn action(&self) -> &PendingAction {
        &self.action
    }
}

impl<T: Clone> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        self.modal.finish();
    }
}
