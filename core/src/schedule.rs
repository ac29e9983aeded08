//! The schedule evaluator — runs after every day change.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Quiz window check
//!   2. Standard-loan interest        (background)
//!   3. Wild-boar interest / penalty  (background)
//!   4. Standard-loan offer check
//!   5. Wild-boar offer check
//!   6. Event-catalog lookup
//!
//! RULES:
//!   - Background effects (2-3) always apply; gating never suppresses them.
//!   - Exactly one gating candidate wins, by fixed priority:
//!     WildBoarOffer > StandardOffer > Quiz > Event > None.
//!   - `apply_background_effects` fires exactly once per day change.
//!     `select_gate` is side-effect-free and re-runs once after every
//!     resolution, never recursively.

use crate::catalog::EventCatalog;
use crate::config::SimConfig;
use crate::event::SimEvent;
use crate::loan::{self, LoanKind};
use crate::state::SimulationState;

/// A gating candidate. The resolver turns the winner into a concrete
/// `Interruption`, drawing a quiz question where needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    None,
    WildBoarOffer,
    StandardOffer,
    Quiz,
    Event(u32),
}

/// Steps 2-3: interest charges and the wild-boar penalty path.
pub fn apply_background_effects(
    state: &mut SimulationState,
    config: &SimConfig,
) -> Vec<SimEvent> {
    let mut events = Vec::new();
    let day = state.day;

    if config.standard_loan.interest_days.contains(&day) {
        if let Some(standard) = &state.standard_loan {
            // Never blocked — money may go negative.
            let due = loan::charge(standard.amount, standard.rate, config.standard_loan.divisor);
            state.money -= due;
            events.push(SimEvent::InterestCharged {
                day,
                loan: LoanKind::Standard,
                amount: due,
            });
        }
    }

    if config.wild_boar_loan.interest_days.contains(&day) {
        let terms = &config.wild_boar_loan;
        if let Some(boar) = &mut state.wild_boar_loan {
            let due = loan::charge(boar.amount, boar.rate, terms.divisor);
            if state.money >= due {
                state.money -= due;
                boar.missed_payments = 0;
                events.push(SimEvent::InterestCharged {
                    day,
                    loan: LoanKind::WildBoar,
                    amount: due,
                });
            } else {
                boar.missed_payments += 1;
                boar.rate += terms.rate_step;
                let missed = boar.missed_payments;
                let rate = boar.rate;
                state.adjust_happiness(-terms.miss_penalty);
                if missed >= terms.chronic_threshold {
                    state.adjust_happiness(-terms.chronic_penalty);
                }
                events.push(SimEvent::PaymentMissed {
                    day,
                    missed_payments: missed,
                    rate,
                });
            }
        }
    }

    events
}

/// Steps 1, 4-6 plus the priority pick: the single gating candidate.
pub fn select_gate(state: &SimulationState, catalog: &EventCatalog, config: &SimConfig) -> Gate {
    let day = state.day;

    let quiz_due = config.quiz_days.contains(&day) && !state.weekly_quiz_completed;

    let standard_offer = state.money < config.standard_offer_threshold
        && state.standard_loan.is_none()
        && !state.standard_loan_declined
        && day < config.offer_cutoff_day;

    let wild_boar_offer = state.money < config.wild_boar_offer_threshold
        && state.wild_boar_loan.is_none()
        && !state.wild_boar_declined
        && state.standard_loan.is_none()
        && day < config.offer_cutoff_day;

    if wild_boar_offer {
        Gate::WildBoarOffer
    } else if standard_offer {
        Gate::StandardOffer
    } else if quiz_due {
        Gate::Quiz
    } else if let Some(event) = catalog.first_pending(day, &state.completed_event_ids) {
        Gate::Event(event.id)
    } else {
        Gate::None
    }
}
