//! All tunable constants for a simulated month.
//!
//! `SimConfig::default()` is the canonical rule set the game ships with.
//! `SimConfig::load` reads a JSON override file so the runner can
//! experiment with different terms without a rebuild; every missing field
//! falls back to the default.

use crate::types::{Day, Money};
use serde::{Deserialize, Serialize};

/// Terms of the standard bank loan offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardLoanTerms {
    pub amount: Money,
    pub rate: f64,
    /// Days on which an interest installment is charged (semi-monthly).
    pub interest_days: Vec<Day>,
    /// Installment divisor: each charge is ceil(amount * rate / divisor).
    pub divisor: u32,
}

/// Terms of the predatory "wild boar" loan offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WildBoarLoanTerms {
    pub amount: Money,
    pub rate: f64,
    pub interest_days: Vec<Day>,
    pub divisor: u32,
    /// Rate increase applied on every missed payment.
    pub rate_step: f64,
    /// Happiness lost on a missed payment.
    pub miss_penalty: i32,
    /// Extra happiness lost while missed payments sit at or above the
    /// chronic threshold. Re-fires on every charge day the condition holds.
    pub chronic_penalty: i32,
    pub chronic_threshold: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub initial_money: Money,
    pub initial_happiness: i32,
    pub standard_loan: StandardLoanTerms,
    pub wild_boar_loan: WildBoarLoanTerms,
    /// Days that open a new quiz window.
    pub quiz_days: Vec<Day>,
    /// Money credited for a correct quiz answer.
    pub quiz_bonus: Money,
    /// Below this balance the standard loan is offered.
    pub standard_offer_threshold: Money,
    /// Below this balance the wild-boar loan is offered.
    pub wild_boar_offer_threshold: Money,
    /// No loan offers on or after this day.
    pub offer_cutoff_day: Day,
    pub final_day: Day,
    /// Quiz-question ids remembered for non-repeat selection.
    pub question_history_cap: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_money: 150_000,
            initial_happiness: 50,
            standard_loan: StandardLoanTerms {
                amount: 30_000,
                rate: 0.15,
                interest_days: vec![10, 25],
                divisor: 2,
            },
            wild_boar_loan: WildBoarLoanTerms {
                amount: 20_000,
                rate: 0.30,
                interest_days: vec![5, 10, 15, 20, 25, 30],
                divisor: 6,
                rate_step: 0.05,
                miss_penalty: 5,
                chronic_penalty: 10,
                chronic_threshold: 3,
            },
            quiz_days: vec![7, 14, 21, 28],
            quiz_bonus: 5_000,
            standard_offer_threshold: 5_000,
            wild_boar_offer_threshold: 2_000,
            offer_cutoff_day: 28,
            final_day: 30,
            question_history_cap: 10,
        }
    }
}

impl SimConfig {
    /// Load an override file. Missing fields keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
