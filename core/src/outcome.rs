//! Terminal-day scoring — the outcome evaluator.
//!
//! Two disjoint star ladders depending on whether the player carried the
//! wild-boar loan through the month. Runs once the final day is reached;
//! safe to invoke again on a resumed session. The survivor badge is
//! idempotent; the wild-boar completion badge deliberately is not.

use crate::event::SimEvent;
use crate::state::SimulationState;
use serde::{Deserialize, Serialize};

pub const SURVIVOR_BADGE: &str = "家計サバイバー";
pub const WILD_BOAR_CLEARED_BADGE: &str = "危険な橋を渡り切った猛者";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub stars: u8,
    pub message: String,
    pub badges_awarded: Vec<String>,
}

pub fn evaluate(state: &mut SimulationState) -> (Outcome, Vec<SimEvent>) {
    let (stars, message) = if state.wild_boar_loan.is_some() {
        match state.money {
            m if m >= 30_000 => (2, "高金利の借金を抱えながらも黒字で乗り切りました。次は借りずに挑戦しましょう。"),
            m if m >= 0 => (1, "なんとか月末までたどり着きました。高金利の借金は早めの完済が肝心です。"),
            _ => (0, "借金が家計を押しつぶしてしまいました。返済計画を立て直しましょう。"),
        }
    } else {
        match state.money {
            m if m >= 50_000 => (3, "見事な家計管理です。余裕を持って月末を迎えられました。"),
            m if m >= 10_000 => (2, "堅実なやりくりで月を乗り切りました。あと一歩で満点です。"),
            m if m >= 0 => (1, "ぎりぎりの家計でしたが、赤字は回避できました。"),
            _ => (0, "支出が収入を上回ってしまいました。固定費の見直しから始めましょう。"),
        }
    };

    let mut badges_awarded = Vec::new();
    let mut events = vec![SimEvent::OutcomeReached { stars }];

    if state.money >= 0 && !state.has_badge(SURVIVOR_BADGE) {
        state.award_badge(SURVIVOR_BADGE);
        badges_awarded.push(SURVIVOR_BADGE.to_string());
        events.push(SimEvent::BadgeEarned {
            badge: SURVIVOR_BADGE.to_string(),
        });
    }

    let wild_boar_cleared = state
        .wild_boar_loan
        .as_ref()
        .is_some_and(|boar| boar.missed_payments == 0);
    if wild_boar_cleared && state.money >= 0 {
        // Appended without an existence check — the award log keeps
        // duplicates for this badge.
        state.award_badge(WILD_BOAR_CLEARED_BADGE);
        badges_awarded.push(WILD_BOAR_CLEARED_BADGE.to_string());
        events.push(SimEvent::BadgeEarned {
            badge: WILD_BOAR_CLEARED_BADGE.to_string(),
        });
    }

    (
        Outcome {
            stars,
            message: message.to_string(),
            badges_awarded,
        },
        events,
    )
}
