//! The dual-loan subsystem — one standard bank loan and one predatory
//! "wild boar" loan, with independent schedules and penalty rules.
//!
//! RULES:
//!   - An instrument's `amount` is set exactly once, at acceptance.
//!   - The standard charge is never blocked: money may go negative.
//!   - A short wild-boar payment takes the penalty path instead
//!     (handled by the schedule evaluator).

use crate::config::SimConfig;
use crate::event::SimEvent;
use crate::state::{SimulationState, StandardLoan, WildBoarLoan};
use crate::types::Money;
use serde::{Deserialize, Serialize};

pub const DECLINE_BADGE_STANDARD: &str = "借入回避マスター";
pub const DECLINE_BADGE_WILD_BOAR: &str = "危険回避の達人";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanKind {
    Standard,
    WildBoar,
}

/// One interest installment: ceil(amount * rate / divisor).
pub fn charge(amount: Money, rate: f64, divisor: u32) -> Money {
    (amount as f64 * rate / divisor as f64).ceil() as Money
}

/// Accept the offered loan: set the instrument once, credit the principal.
pub fn accept(state: &mut SimulationState, kind: LoanKind, config: &SimConfig) -> Vec<SimEvent> {
    let amount = match kind {
        LoanKind::Standard => {
            let terms = &config.standard_loan;
            state.standard_loan = Some(StandardLoan {
                amount: terms.amount,
                rate: terms.rate,
            });
            terms.amount
        }
        LoanKind::WildBoar => {
            let terms = &config.wild_boar_loan;
            state.wild_boar_loan = Some(WildBoarLoan {
                amount: terms.amount,
                rate: terms.rate,
                missed_payments: 0,
            });
            terms.amount
        }
    };
    state.money += amount;
    vec![SimEvent::LoanAccepted { loan: kind, amount }]
}

/// Decline the offered loan: award the avoidance badge, leave money alone.
/// A declined offer is never shown again this month.
pub fn decline(state: &mut SimulationState, kind: LoanKind) -> Vec<SimEvent> {
    let badge = match kind {
        LoanKind::Standard => {
            state.standard_loan_declined = true;
            DECLINE_BADGE_STANDARD
        }
        LoanKind::WildBoar => {
            state.wild_boar_declined = true;
            DECLINE_BADGE_WILD_BOAR
        }
    };
    state.award_badge(badge);
    vec![
        SimEvent::LoanDeclined { loan: kind },
        SimEvent::BadgeEarned {
            badge: badge.to_string(),
        },
    ]
}
