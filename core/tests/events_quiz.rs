use kakei_core::{
    config::SimConfig,
    engine::SimEngine,
    error::SimError,
    notify::Notifier,
    state::{Interruption, SimulationState},
    store::{SaveStore, SAVE_KEY},
    types::Day,
};
use std::collections::VecDeque;

// ── Test helpers ────────────────────────────────────────────────────────────

fn make_engine(seed: u64) -> SimEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = SaveStore::in_memory().unwrap();
    store.migrate().unwrap();
    let mut engine = SimEngine::build(
        "test-session".into(),
        seed,
        SimConfig::default(),
        store,
        Notifier::silent(),
    );
    engine.hydrate().unwrap();
    engine
}

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

fn resolve_frugally(engine: &mut SimEngine) {
    match engine.interruption().clone() {
        Interruption::None => {}
        Interruption::StandardOffer | Interruption::WildBoarOffer => {
            engine.decline_offer().unwrap();
        }
        Interruption::Quiz { .. } => {
            engine.answer_quiz(0).unwrap();
        }
        Interruption::Event { .. } => {
            let index = {
                let event = engine.current_event().unwrap();
                event
                    .options
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, o)| o.cost - o.reward)
                    .map(|(i, _)| i)
                    .unwrap()
            };
            engine.choose_event_option(index).unwrap();
        }
    }
}

fn advance_to(engine: &mut SimEngine, target: Day) {
    while engine.state().day < target {
        if engine.interruption().is_none() {
            engine.advance_day().unwrap();
        } else {
            resolve_frugally(engine);
        }
    }
}

// ── Events ───────────────────────────────────────────────────────────────────

#[test]
fn scripted_event_gates_on_its_day() {
    let mut engine = make_engine(11);
    engine.advance_day().unwrap();
    assert!(matches!(
        engine.interruption(),
        Interruption::Event { event_id: 1 }
    ));
    let event = engine.current_event().unwrap();
    assert_eq!(event.day, 2);
    assert_eq!(event.options.len(), 2);
}

#[test]
fn resolving_an_event_applies_money_happiness_and_completion() {
    let mut engine = make_engine(12);
    engine.advance_day().unwrap();

    // Day 2, option 0: join the night out — 5000 yen, +10 happiness.
    engine.choose_event_option(0).unwrap();

    let state = engine.state();
    assert_eq!(state.money, 145_000);
    assert_eq!(state.happiness, 60);
    assert!(state.completed_event_ids.contains(&1));
    assert_eq!(*engine.interruption(), Interruption::None);
}

#[test]
fn happiness_is_clamped_at_the_ceiling() {
    let mut state = fresh_state();
    state.happiness = 95;
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap();
    engine.choose_event_option(0).unwrap(); // +10

    assert_eq!(engine.state().happiness, 100);
}

#[test]
fn happiness_is_clamped_at_the_floor() {
    let mut state = fresh_state();
    state.happiness = 3;
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap();
    engine.choose_event_option(1).unwrap(); // -5

    assert_eq!(engine.state().happiness, 0);
}

#[test]
fn completed_event_does_not_gate_again() {
    let mut engine = make_engine(13);
    engine.advance_day().unwrap();
    engine.choose_event_option(1).unwrap();
    assert_eq!(*engine.interruption(), Interruption::None);

    engine.advance_day().unwrap();
    assert!(matches!(
        engine.interruption(),
        Interruption::Event { event_id: 2 }
    ));
}

#[test]
fn out_of_range_option_is_rejected_without_mutation() {
    let mut engine = make_engine(14);
    engine.advance_day().unwrap();
    let money_before = engine.state().money;

    let err = engine.choose_event_option(5).unwrap_err();
    assert!(matches!(err, SimError::UnknownOption { .. }));
    assert_eq!(engine.state().money, money_before);
    assert!(matches!(
        engine.interruption(),
        Interruption::Event { event_id: 1 }
    ));
}

#[test]
fn event_badges_append_without_deduplication() {
    let mut state = fresh_state();
    state.day = 25;
    state.money = 100_000;
    state.weekly_quiz_completed = true;
    state.achieved_badges.push("節約の鉄人".into());
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap(); // day 26 — the bargain-sale temptation
    engine.choose_event_option(1).unwrap(); // resist, earning the badge again

    let badges = &engine.state().achieved_badges;
    let count = badges.iter().filter(|b| *b == "節約の鉄人").count();
    assert_eq!(count, 2, "event badges are an append-only log");
}

// ── Quizzes ──────────────────────────────────────────────────────────────────

#[test]
fn correct_answer_pays_the_fixed_bonus() {
    let mut engine = make_engine(21);
    advance_to(&mut engine, 7);
    let (correct_index, question_id) = {
        let question = engine.current_question().expect("quiz should be pending");
        (question.correct_index, question.id)
    };
    let money_before = engine.state().money;

    engine.answer_quiz(correct_index).unwrap();

    let state = engine.state();
    assert_eq!(state.money, money_before + 5_000);
    assert!(state.weekly_quiz_completed);
    assert!(state.asked_question_history.contains(&question_id));
}

#[test]
fn wrong_answer_still_closes_the_quiz_window() {
    let mut engine = make_engine(22);
    advance_to(&mut engine, 7);
    let (correct_index, option_count) = {
        let question = engine.current_question().expect("quiz should be pending");
        (question.correct_index, question.options.len())
    };
    let money_before = engine.state().money;

    engine.answer_quiz((correct_index + 1) % option_count).unwrap();

    let state = engine.state();
    assert_eq!(state.money, money_before, "no bonus for a wrong answer");
    assert!(state.weekly_quiz_completed);
}

#[test]
fn answering_twice_is_rejected() {
    let mut engine = make_engine(23);
    advance_to(&mut engine, 7);
    engine.answer_quiz(0).unwrap();

    let err = engine.answer_quiz(0).unwrap_err();
    assert!(matches!(err, SimError::InvalidTransition { .. }));
}

#[test]
fn questions_do_not_repeat_within_a_month() {
    let mut engine = make_engine(24);
    advance_to(&mut engine, 30);
    resolve_frugally(&mut engine);

    let history = &engine.state().asked_question_history;
    assert_eq!(history.len(), 4, "one question per quiz day");
    let mut distinct: Vec<u32> = history.iter().copied().collect();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(distinct.len(), 4, "recently served questions must not repeat");
}

#[test]
fn history_is_trimmed_to_the_cap() {
    let mut state = fresh_state();
    state.day = 6;
    state.asked_question_history = (101..=110).collect::<VecDeque<u32>>();
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap(); // day 7 draws a question
    assert!(matches!(engine.interruption(), Interruption::Quiz { .. }));

    let history = &engine.state().asked_question_history;
    assert_eq!(history.len(), 10, "history is bounded");
    assert_eq!(history.front(), Some(&102), "oldest entry is evicted first");
}

#[test]
fn selection_falls_back_once_every_question_was_asked() {
    let mut state = fresh_state();
    state.day = 6;
    // All eight bank questions already served.
    state.asked_question_history = (1..=8).collect::<VecDeque<u32>>();
    let mut engine = engine_resuming(&state);

    engine.advance_day().unwrap();

    match engine.interruption() {
        Interruption::Quiz { question_id } => {
            assert!((1..=8).contains(question_id), "fallback draws from the full bank")
        }
        other => panic!("expected a quiz interruption, got {other:?}"),
    }
    assert_eq!(engine.state().asked_question_history.len(), 9);
}
