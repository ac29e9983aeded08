//! The simulation state — one record per session, owned by the engine.
//!
//! RULES:
//!   - Only the engine mutates SimulationState.
//!   - `happiness` is clamped to [0, 100] on every mutation.
//!   - `money` is never clamped; negative money is a meaningful signal.
//!   - The whole record serializes as the persistence blob, so a session
//!     saved mid-interruption rehydrates exactly.

use crate::config::SimConfig;
use crate::types::{Day, Money};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// The standard bank loan. `amount` never changes after acceptance;
/// interest installments debit money only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardLoan {
    pub amount: Money,
    pub rate: f64,
}

/// The predatory wild-boar loan. `rate` only ever increases (one step per
/// missed payment); `missed_payments` resets on a successful installment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WildBoarLoan {
    pub amount: Money,
    pub rate: f64,
    pub missed_payments: u32,
}

/// The single active gating screen. One tagged value instead of a pile of
/// booleans: invalid combinations cannot be represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interruption {
    None,
    WildBoarOffer,
    StandardOffer,
    Quiz { question_id: u32 },
    Event { event_id: u32 },
}

impl Interruption {
    pub fn is_none(&self) -> bool {
        matches!(self, Interruption::None)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub day: Day,
    pub money: Money,
    pub happiness: i32,
    pub standard_loan: Option<StandardLoan>,
    pub wild_boar_loan: Option<WildBoarLoan>,
    /// A declined offer is never shown again.
    pub standard_loan_declined: bool,
    pub wild_boar_declined: bool,
    pub completed_event_ids: BTreeSet<u32>,
    /// Ordered append-only award log. Duplicates are allowed except where
    /// a specific badge is documented as idempotent.
    pub achieved_badges: Vec<String>,
    pub weekly_quiz_completed: bool,
    /// FIFO of recently served quiz-question ids, bounded by the config cap.
    pub asked_question_history: VecDeque<u32>,
    pub interruption: Interruption,
}

impl SimulationState {
    /// A fresh month with the documented starting constants.
    pub fn fresh(config: &SimConfig) -> Self {
        Self {
            day: 1,
            money: config.initial_money,
            happiness: config.initial_happiness,
            standard_loan: None,
            wild_boar_loan: None,
            standard_loan_declined: false,
            wild_boar_declined: false,
            completed_event_ids: BTreeSet::new(),
            achieved_badges: Vec::new(),
            weekly_quiz_completed: false,
            asked_question_history: VecDeque::new(),
            interruption: Interruption::None,
        }
    }

    /// Apply a happiness delta, clamping to [0, 100].
    pub fn adjust_happiness(&mut self, delta: i32) {
        self.happiness = (self.happiness + delta).clamp(0, 100);
    }

    /// Append a badge to the award log. No uniqueness check here — callers
    /// that need idempotence check `has_badge` first.
    pub fn award_badge(&mut self, badge: &str) {
        self.achieved_badges.push(badge.to_string());
    }

    pub fn has_badge(&self, badge: &str) -> bool {
        self.achieved_badges.iter().any(|b| b == badge)
    }

    /// Record a served quiz question, trimming the history to `cap`.
    pub fn remember_question(&mut self, question_id: u32, cap: usize) {
        self.asked_question_history.push_back(question_id);
        while self.asked_question_history.len() > cap {
            self.asked_question_history.pop_front();
        }
    }
}
