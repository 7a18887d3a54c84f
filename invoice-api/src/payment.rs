//! Invoice payment-state transitions.
//!
//! The store only keeps `paid` and `paid_date`; it has no notion of the
//! moment a payment happened. That moment is derived here from the stored
//! `paid_date` and the `paid` flag of an incoming update, so that after every
//! write `paid_date` is set exactly when `paid` is true.

use chrono::NaiveDateTime;

/// Outcome of applying a `paid` flag to an invoice's stored payment date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentTransition {
    /// The invoice was unpaid and is now paid at the given time.
    MarkedPaid(NaiveDateTime),
    /// The invoice is (now) unpaid; any previous payment date is dropped.
    Cleared,
    /// The invoice was already paid and stays paid; the original date holds.
    Unchanged(NaiveDateTime),
}

impl PaymentTransition {
    /// Decides the transition from the current `paid_date` and the incoming
    /// `paid` flag. `now` is only used when a payment just occurred.
    pub fn between(current: Option<NaiveDateTime>, paid: bool, now: NaiveDateTime) -> Self {
        match (current, paid) {
            (None, true) => PaymentTransition::MarkedPaid(now),
            (_, false) => PaymentTransition::Cleared,
            (Some(existing), true) => PaymentTransition::Unchanged(existing),
        }
    }

    /// The `paid_date` to persist.
    pub fn paid_date(&self) -> Option<NaiveDateTime> {
        match *self {
            PaymentTransition::MarkedPaid(at) | PaymentTransition::Unchanged(at) => Some(at),
            PaymentTransition::Cleared => None,
        }
    }
}

/// Computes the next `paid_date` for an invoice.
pub fn next_paid_date(
    current: Option<NaiveDateTime>,
    paid: bool,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    PaymentTransition::between(current, paid, now).paid_date()
}
