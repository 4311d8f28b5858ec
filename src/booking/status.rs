//! Legal booking status transitions.
//!
//! Handlers never mutate `status` directly; they go through the lifecycle
//! functions in the parent module, which consult this table first. An illegal
//! transition is a `Conflict` and must leave the booking untouched.

use crate::error::ApiError;
use crate::models::bookings::BookingStatus;

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the user may still edit schedule/location details.
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Pending | Self::Assigned | Self::Accepted)
    }

    /// Whether the user may cancel: any non-terminal state except a job
    /// already underway.
    pub fn is_cancellable(self) -> bool {
        !self.is_terminal() && self != Self::InProgress
    }
}

/// The fixed transition table. `Rejected` is transient: a rejection
/// immediately re-routes to `Assigned` (new partner) or falls back to
/// `Pending`, so it is a legal source for both.
pub fn is_legal(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (Pending, Assigned)
            | (Assigned, Accepted)
            | (Assigned, Rejected)
            | (Rejected, Assigned)
            | (Rejected, Pending)
            | (Accepted, InProgress)
            | (InProgress, Paused)
            | (Paused, InProgress)
            | (InProgress, Completed)
            | (Pending, Cancelled)
            | (Assigned, Cancelled)
            | (Accepted, Cancelled)
            | (Paused, Cancelled)
    )
}

/// Guard used by every lifecycle operation.
pub fn ensure_transition(from: BookingStatus, to: BookingStatus) -> Result<(), ApiError> {
    if is_legal(from, to) {
        Ok(())
    } else {
        Err(ApiError::conflict(format!(
            "illegal booking transition: {from:?} -> {to:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingStatus::*;

    #[test]
    fn happy_path_is_legal() {
        for (from, to) in [
            (Pending, Assigned),
            (Assigned, Accepted),
            (Accepted, InProgress),
            (InProgress, Completed),
        ] {
            assert!(is_legal(from, to), "{from:?} -> {to:?}");
        }
    }

    #[test]
    fn accept_requires_assigned() {
        for from in [Pending, Accepted, InProgress, Completed, Cancelled, Paused] {
            assert!(ensure_transition(from, Accepted).is_err(), "{from:?}");
        }
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for to in [
            Pending, Assigned, Accepted, InProgress, Completed, Cancelled, Rejected, Paused,
        ] {
            assert!(!is_legal(Completed, to));
            assert!(!is_legal(Cancelled, to));
        }
    }

    #[test]
    fn in_progress_cannot_be_cancelled() {
        assert!(!is_legal(InProgress, Cancelled));
        assert!(!InProgress.is_cancellable());
        assert!(Assigned.is_cancellable());
        assert!(Pending.is_cancellable());
    }

    #[test]
    fn rejection_reroutes_both_ways() {
        assert!(is_legal(Assigned, Rejected));
        assert!(is_legal(Rejected, Assigned));
        assert!(is_legal(Rejected, Pending));
    }

    #[test]
    fn editability_stops_at_in_progress() {
        assert!(Pending.is_editable());
        assert!(Assigned.is_editable());
        assert!(Accepted.is_editable());
        assert!(!InProgress.is_editable());
        assert!(!Completed.is_editable());
        assert!(!Cancelled.is_editable());
    }
}
