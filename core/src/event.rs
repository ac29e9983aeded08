//! Notifications emitted by the engine for the UI layer.
//!
//! These are transient: dispatched to the notification sink and returned
//! to the caller, never persisted, no delivery guarantee.
//! Variants are added as the game grows — never removed or reordered.

use crate::loan::LoanKind;
use crate::types::{Day, Money};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Day progression ───────────────────────────
    DayAdvanced {
        day: Day,
    },

    // ── Loan subsystem ────────────────────────────
    InterestCharged {
        day: Day,
        loan: LoanKind,
        amount: Money,
    },
    PaymentMissed {
        day: Day,
        missed_payments: u32,
        rate: f64,
    },
    LoanAccepted {
        loan: LoanKind,
        amount: Money,
    },
    LoanDeclined {
        loan: LoanKind,
    },

    // ── Events and quizzes ────────────────────────
    EventResolved {
        event_id: u32,
        money_delta: Money,
        happiness_delta: i32,
    },
    QuizAnswered {
        question_id: u32,
        correct: bool,
        bonus: Money,
    },

    // ── Badges and outcome ────────────────────────
    BadgeEarned {
        badge: String,
    },
    OutcomeReached {
        stars: u8,
    },

    // ── Session lifecycle ─────────────────────────
    SessionHydrated {
        day: Day,
        resumed: bool,
    },
    SessionReset,
}

/// Stable string name for a SimEvent variant, used in log lines.
pub fn event_type_name(event: &SimEvent) -> &'static str {
    match event {
        SimEvent::DayAdvanced { .. }     => "day_advanced",
        SimEvent::InterestCharged { .. } => "interest_charged",
        SimEvent::PaymentMissed { .. }   => "payment_missed",
        SimEvent::LoanAccepted { .. }    => "loan_accepted",
        SimEvent::LoanDeclined { .. }    => "loan_declined",
        SimEvent::EventResolved { .. }   => "event_resolved",
        SimEvent::QuizAnswered { .. }    => "quiz_answered",
        SimEvent::BadgeEarned { .. }     => "badge_earned",
        SimEvent::OutcomeReached { .. }  => "outcome_reached",
        SimEvent::SessionHydrated { .. } => "session_hydrated",
        SimEvent::SessionReset           => "session_reset",
    }
}
