use kakei_core::{
    config::SimConfig,
    engine::SimEngine,
    loan::{charge, DECLINE_BADGE_STANDARD, DECLINE_BADGE_WILD_BOAR},
    notify::Notifier,
    state::{Interruption, SimulationState, StandardLoan, WildBoarLoan},
    store::{SaveStore, SAVE_KEY},
};

// ── Test helpers ────────────────────────────────────────────────────────────

/// Build an engine that resumes from a crafted state, by planting the blob
/// in the store before hydration — the same path a real resumed session
/// takes.
fn engine_resuming(state: &SimulationState) -> SimEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = SaveStore::in_memory().unwrap();
    store.migrate().unwrap();
    store
        .save_state(SAVE_KEY, &serde_json::to_string(state).unwrap())
        .unwrap();
    let mut engine = SimEngine::build(
        "test-session".into(),
        7,
        SimConfig::default(),
        store,
        Notifier::silent(),
    );
    engine.hydrate().unwrap();
    engine
}

fn fresh_state() -> SimulationState {
    SimulationState::fresh(&SimConfig::default())
}

fn badge_count(state: &SimulationState, badge: &str) -> usize {
    state.achieved_badges.iter().filter(|b| *b == badge).count()
}

// ── Charge arithmetic ────────────────────────────────────────────────────────

#[test]
fn charge_is_ceiling_of_amount_rate_over_divisor() {
    assert_eq!(charge(30_000, 0.15, 2), 2_250);
    assert_eq!(charge(20_000, 0.30, 6), 1_000);
    assert_eq!(charge(10_000, 0.15, 2), 750);
    // Fractional installments round up, never down.
    assert_eq!(charge(9_999, 0.15, 2), 750);
    assert_eq!(charge(100, 0.30, 6), 5);
}

// ── Standard loan ────────────────────────────────────────────────────────────

/// Scenario A: a 30000 @ 0.15 standard loan charges exactly 2250 on day 10.
#[test]
fn standard_interest_debits_2250_on_day_10() {
    let mut state = fresh_state();
    state.day = 9;
    state.money = 100_000;
    state.standard_loan = Some(StandardLoan {
        amount: 30_000,
        rate: 0.15,
    });
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap();

    let state = engine.state();
    assert_eq!(state.day, 10);
    assert_eq!(state.money, 100_000 - 2_250);
    let loan = state.standard_loan.as_ref().unwrap();
    assert_eq!(loan.amount, 30_000, "interest must never touch the principal");
}

#[test]
fn standard_interest_is_never_blocked_by_low_funds() {
    let mut state = fresh_state();
    state.day = 9;
    state.money = 1_000;
    state.standard_loan = Some(StandardLoan {
        amount: 30_000,
        rate: 0.15,
    });
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap();

    assert_eq!(engine.state().money, 1_000 - 2_250);
}

#[test]
fn accepting_sets_instrument_once_and_credits_money() {
    let mut state = fresh_state();
    state.day = 5;
    state.money = 4_000;
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap();
    assert_eq!(*engine.interruption(), Interruption::StandardOffer);

    engine.accept_offer().unwrap();

    let state = engine.state();
    assert_eq!(state.money, 34_000);
    assert_eq!(
        state.standard_loan,
        Some(StandardLoan {
            amount: 30_000,
            rate: 0.15
        })
    );
    // The resolved offer re-gates into the day's scripted event.
    assert!(matches!(
        engine.interruption(),
        Interruption::Event { event_id: 4 }
    ));
}

#[test]
fn declining_awards_one_badge_and_leaves_money_alone() {
    let mut state = fresh_state();
    state.day = 5;
    state.money = 4_000;
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap();
    assert_eq!(*engine.interruption(), Interruption::StandardOffer);

    engine.decline_offer().unwrap();

    let state = engine.state();
    assert_eq!(state.money, 4_000);
    assert!(state.standard_loan.is_none());
    assert!(state.standard_loan_declined);
    assert_eq!(badge_count(state, DECLINE_BADGE_STANDARD), 1);
    // Declined offers never re-gate; the day's event shows instead.
    assert!(matches!(
        engine.interruption(),
        Interruption::Event { event_id: 4 }
    ));
}

// ── Wild-boar loan ───────────────────────────────────────────────────────────

/// Scenario B: 20000 @ 0.30 with 500 on hand at day 5 — the 1000 due cannot
/// be paid, so the penalty path fires.
#[test]
fn wild_boar_missed_payment_penalty() {
    let mut state = fresh_state();
    state.day = 4;
    state.money = 500;
    state.happiness = 50;
    state.wild_boar_loan = Some(WildBoarLoan {
        amount: 20_000,
        rate: 0.30,
        missed_payments: 0,
    });
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap();

    let state = engine.state();
    assert_eq!(state.money, 500, "a missed payment must not debit money");
    assert_eq!(state.happiness, 45);
    let boar = state.wild_boar_loan.as_ref().unwrap();
    assert_eq!(boar.missed_payments, 1);
    assert!(
        (boar.rate - 0.35).abs() < 1e-9,
        "rate should step to 0.35, got {}",
        boar.rate
    );
    // Broke and loanless otherwise: the standard offer gates.
    assert_eq!(*engine.interruption(), Interruption::StandardOffer);
}

#[test]
fn wild_boar_successful_payment_resets_missed_counter() {
    let mut state = fresh_state();
    state.day = 4;
    state.money = 10_000;
    state.wild_boar_loan = Some(WildBoarLoan {
        amount: 20_000,
        rate: 0.30,
        missed_payments: 2,
    });
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap();

    let state = engine.state();
    assert_eq!(state.money, 9_000);
    let boar = state.wild_boar_loan.as_ref().unwrap();
    assert_eq!(boar.missed_payments, 0);
    assert_eq!(boar.amount, 20_000);
}

#[test]
fn third_missed_payment_takes_the_chronic_penalty() {
    let mut state = fresh_state();
    state.day = 14;
    state.money = 0;
    state.happiness = 50;
    state.weekly_quiz_completed = true; // day 14 window already used
    state.wild_boar_loan = Some(WildBoarLoan {
        amount: 20_000,
        rate: 0.40,
        missed_payments: 2,
    });
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap();

    let state = engine.state();
    let boar = state.wild_boar_loan.as_ref().unwrap();
    assert_eq!(boar.missed_payments, 3);
    assert!((boar.rate - 0.45).abs() < 1e-9);
    assert_eq!(state.happiness, 50 - 5 - 10, "chronic penalty stacks on the miss");
}

#[test]
fn wild_boar_rate_never_decreases() {
    let mut state = fresh_state();
    state.day = 4;
    state.money = 0;
    state.wild_boar_loan = Some(WildBoarLoan {
        amount: 20_000,
        rate: 0.30,
        missed_payments: 0,
    });
    let mut engine = engine_resuming(&state);

    let mut last_rate = 0.30;
    while engine.state().day < 30 {
        if engine.interruption().is_none() {
            engine.advance_day().unwrap();
        } else {
            match engine.interruption().clone() {
                Interruption::StandardOffer | Interruption::WildBoarOffer => {
                    engine.decline_offer().unwrap()
                }
                Interruption::Quiz { .. } => engine.answer_quiz(0).unwrap(),
                Interruption::Event { .. } => engine.choose_event_option(0).unwrap(),
                Interruption::None => unreachable!(),
            };
        }
        let rate = engine.state().wild_boar_loan.as_ref().unwrap().rate;
        assert!(rate >= last_rate, "rate decreased from {last_rate} to {rate}");
        last_rate = rate;
    }
}

// ── Offer gating ─────────────────────────────────────────────────────────────

#[test]
fn wild_boar_offer_outranks_standard_offer() {
    let mut state = fresh_state();
    state.day = 5;
    state.money = 1_000; // below both thresholds
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap();
    assert_eq!(*engine.interruption(), Interruption::WildBoarOffer);

    // Declining walks down the priority ladder one gate at a time.
    engine.decline_offer().unwrap();
    assert_eq!(*engine.interruption(), Interruption::StandardOffer);
    engine.decline_offer().unwrap();
    assert!(matches!(
        engine.interruption(),
        Interruption::Event { event_id: 4 }
    ));

    let state = engine.state();
    assert_eq!(badge_count(state, DECLINE_BADGE_WILD_BOAR), 1);
    assert_eq!(badge_count(state, DECLINE_BADGE_STANDARD), 1);
    assert_eq!(state.money, 1_000);
}

#[test]
fn no_offers_on_or_after_the_cutoff_day() {
    let mut state = fresh_state();
    state.day = 27;
    state.money = 1_000;
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap();

    // Day 28 is past the offer cutoff; the weekly quiz gates instead.
    assert!(matches!(engine.interruption(), Interruption::Quiz { .. }));
}
