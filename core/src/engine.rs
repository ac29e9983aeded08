//! The simulation engine — day progression and interruption resolution.
//!
//! RULES:
//!   - The engine exclusively owns SimulationState; every mutation goes
//!     through an operation below.
//!   - Exactly one interruption can be pending at a time; the day cannot
//!     advance until it is resolved.
//!   - Background effects (interest, penalties) fire once per day change
//!     and are never suppressed by gating.
//!   - Saves are fire-and-forget: failures are logged, never surfaced.
//!   - Lifecycle runs Uninitialized → Loading → Ready; nothing is saved
//!     before hydration completes.

use crate::{
    catalog::{self, DayEvent, EventCatalog},
    config::SimConfig,
    error::{SimError, SimResult},
    event::SimEvent,
    loan::{self, LoanKind},
    notify::Notifier,
    outcome::{self, Outcome},
    quiz::{self, QuizBank, QuizQuestion},
    rng::{SessionRng, Stream},
    schedule::{self, Gate},
    state::{Interruption, SimulationState},
    store::{SaveStore, SAVE_KEY},
    types::SessionId,
};

/// Hydration lifecycle. Saves are suppressed until Ready, so a save can
/// never race the initial load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Loading,
    Ready,
}

pub struct SimEngine {
    pub session_id: SessionId,
    config:    SimConfig,
    catalog:   EventCatalog,
    quiz_bank: QuizBank,
    quiz_rng:  SessionRng,
    state:     SimulationState,
    lifecycle: Lifecycle,
    store:     SaveStore,
    notifier:  Notifier,
}

impl SimEngine {
    /// Assemble an engine with the built-in catalog and quiz bank.
    /// The engine starts Uninitialized; call hydrate() before any operation.
    pub fn build(
        session_id: SessionId,
        seed: u64,
        config: SimConfig,
        store: SaveStore,
        notifier: Notifier,
    ) -> Self {
        let state = SimulationState::fresh(&config);
        Self {
            session_id,
            catalog: EventCatalog::builtin(),
            quiz_bank: QuizBank::builtin(),
            quiz_rng: SessionRng::new(seed, Stream::Quiz),
            state,
            lifecycle: Lifecycle::Uninitialized,
            store,
            notifier,
            config,
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Load the saved month (fail-open) and bring the engine to Ready.
    pub fn hydrate(&mut self) -> SimResult<Vec<SimEvent>> {
        self.lifecycle = Lifecycle::Loading;
        let mut resumed = false;
        match self.store.load_state(SAVE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<SimulationState>(&json) {
                Ok(saved) => {
                    self.state = saved;
                    resumed = true;
                }
                Err(e) => {
                    // Fail open: a malformed blob reads as "no saved state".
                    log::warn!("Discarding unreadable save blob: {e}");
                }
            },
            Ok(None) => {}
            Err(e) => {
                log::warn!("Save store unreadable, starting fresh: {e}");
            }
        }
        self.notifier.initialize()?;
        self.lifecycle = Lifecycle::Ready;
        let events = vec![SimEvent::SessionHydrated {
            day: self.state.day,
            resumed,
        }];
        self.dispatch(&events);
        Ok(events)
    }

    /// Tear down injected capabilities. The saved state stays on disk.
    pub fn shutdown(&mut self) {
        self.notifier.teardown();
        self.lifecycle = Lifecycle::Uninitialized;
    }

    // ── Read access ────────────────────────────────────────────

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn interruption(&self) -> &Interruption {
        &self.state.interruption
    }

    /// The catalog entry behind the current Event interruption, if any.
    pub fn current_event(&self) -> Option<&DayEvent> {
        match self.state.interruption {
            Interruption::Event { event_id } => self.catalog.by_id(event_id),
            _ => None,
        }
    }

    /// The question behind the current Quiz interruption, if any.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state.interruption {
            Interruption::Quiz { question_id } => self.quiz_bank.by_id(question_id),
            _ => None,
        }
    }

    // ── Day progression ────────────────────────────────────────

    /// Advance to the next day, apply scheduled effects, and install the
    /// day's gating interruption.
    pub fn advance_day(&mut self) -> SimResult<Vec<SimEvent>> {
        self.ensure_ready()?;
        if !self.state.interruption.is_none() {
            return Err(SimError::InvalidTransition {
                action: "advance_day",
                reason: "an interruption is pending".into(),
            });
        }
        if self.state.day >= self.config.final_day {
            return Err(SimError::InvalidTransition {
                action: "advance_day",
                reason: format!("day {} is the final day", self.state.day),
            });
        }

        self.state.day += 1;
        if self.config.quiz_days.contains(&self.state.day) {
            self.state.weekly_quiz_completed = false;
        }

        let mut events = vec![SimEvent::DayAdvanced {
            day: self.state.day,
        }];
        events.extend(schedule::apply_background_effects(
            &mut self.state,
            &self.config,
        ));
        self.install_gate(schedule::select_gate(&self.state, &self.catalog, &self.config));

        self.persist();
        self.dispatch(&events);
        Ok(events)
    }

    // ── Interruption resolution ────────────────────────────────

    /// Resolve the pending event by choosing one of its options.
    pub fn choose_event_option(&mut self, option_index: usize) -> SimResult<Vec<SimEvent>> {
        self.ensure_ready()?;
        let event_id = match self.state.interruption {
            Interruption::Event { event_id } => event_id,
            _ => return Err(self.wrong_interruption("choose_event_option")),
        };
        let event = self
            .catalog
            .by_id(event_id)
            .ok_or(SimError::UnknownEvent { id: event_id })?
            .clone();
        let option = event
            .options
            .get(option_index)
            .ok_or(SimError::UnknownOption {
                event_id,
                index: option_index,
            })?;

        let events = catalog::resolve_event(&mut self.state, &event, option);
        self.finish_resolution(&events);
        Ok(events)
    }

    /// Answer the pending quiz question.
    pub fn answer_quiz(&mut self, selected_index: usize) -> SimResult<Vec<SimEvent>> {
        self.ensure_ready()?;
        let question_id = match self.state.interruption {
            Interruption::Quiz { question_id } => question_id,
            _ => return Err(self.wrong_interruption("answer_quiz")),
        };
        let question = self
            .quiz_bank
            .by_id(question_id)
            .ok_or(SimError::UnknownQuestion { id: question_id })?
            .clone();

        let events =
            quiz::resolve_quiz(&mut self.state, &question, selected_index, &self.config);
        self.finish_resolution(&events);
        Ok(events)
    }

    /// Accept the pending loan offer.
    pub fn accept_offer(&mut self) -> SimResult<Vec<SimEvent>> {
        self.ensure_ready()?;
        let kind = self.pending_offer("accept_offer")?;
        let events = loan::accept(&mut self.state, kind, &self.config);
        self.finish_resolution(&events);
        Ok(events)
    }

    /// Decline the pending loan offer, earning the avoidance badge.
    pub fn decline_offer(&mut self) -> SimResult<Vec<SimEvent>> {
        self.ensure_ready()?;
        let kind = self.pending_offer("decline_offer")?;
        let events = loan::decline(&mut self.state, kind);
        self.finish_resolution(&events);
        Ok(events)
    }

    // ── Terminal day ───────────────────────────────────────────

    /// Score the month. Valid once the final day has been reached,
    /// including on a resumed session already at the final day.
    pub fn finish(&mut self) -> SimResult<(Outcome, Vec<SimEvent>)> {
        self.ensure_ready()?;
        if self.state.day < self.config.final_day {
            return Err(SimError::InvalidTransition {
                action: "finish",
                reason: format!("day {} has not reached the final day", self.state.day),
            });
        }
        let (outcome, events) = outcome::evaluate(&mut self.state);
        self.persist();
        self.dispatch(&events);
        Ok((outcome, events))
    }

    // ── Reset ──────────────────────────────────────────────────

    /// Discard the month: clear the save slot and reinitialize the state
    /// to the documented starting constants.
    pub fn reset(&mut self) -> SimResult<Vec<SimEvent>> {
        self.ensure_ready()?;
        self.store.clear(SAVE_KEY)?;
        self.state = SimulationState::fresh(&self.config);
        let events = vec![SimEvent::SessionReset];
        self.dispatch(&events);
        Ok(events)
    }

    // ── Internals ──────────────────────────────────────────────

    fn ensure_ready(&self) -> SimResult<()> {
        if self.lifecycle != Lifecycle::Ready {
            return Err(SimError::NotReady);
        }
        Ok(())
    }

    fn pending_offer(&self, action: &'static str) -> SimResult<LoanKind> {
        match self.state.interruption {
            Interruption::StandardOffer => Ok(LoanKind::Standard),
            Interruption::WildBoarOffer => Ok(LoanKind::WildBoar),
            _ => Err(self.wrong_interruption(action)),
        }
    }

    fn wrong_interruption(&self, action: &'static str) -> SimError {
        SimError::InvalidTransition {
            action,
            reason: format!("pending interruption is {:?}", self.state.interruption),
        }
    }

    /// Clear the tag, re-run gate selection once, save, notify.
    fn finish_resolution(&mut self, events: &[SimEvent]) {
        self.state.interruption = Interruption::None;
        // One re-evaluation pass: the new state may gate again on the same
        // day, never recursively beyond this.
        self.install_gate(schedule::select_gate(&self.state, &self.catalog, &self.config));
        self.persist();
        self.dispatch(events);
    }

    /// Turn the winning gate candidate into the concrete interruption,
    /// drawing the quiz question at install time.
    fn install_gate(&mut self, gate: Gate) {
        self.state.interruption = match gate {
            Gate::None => Interruption::None,
            Gate::WildBoarOffer => Interruption::WildBoarOffer,
            Gate::StandardOffer => Interruption::StandardOffer,
            Gate::Event(event_id) => Interruption::Event { event_id },
            Gate::Quiz => {
                let question = self.quiz_bank.draw(
                    &mut self.state,
                    &mut self.quiz_rng,
                    self.config.question_history_cap,
                );
                Interruption::Quiz {
                    question_id: question.id,
                }
            }
        };
    }

    /// Fire-and-forget save. Failures are logged and otherwise ignored;
    /// nothing is written before hydration completes.
    fn persist(&self) {
        if self.lifecycle != Lifecycle::Ready {
            log::debug!("Skipping save: engine not Ready");
            return;
        }
        let result = serde_json::to_string(&self.state)
            .map_err(SimError::from)
            .and_then(|json| self.store.save_state(SAVE_KEY, &json));
        if let Err(e) = result {
            log::warn!("Save failed (ignored): {e}");
        }
    }

    fn dispatch(&mut self, events: &[SimEvent]) {
        for event in events {
            self.notifier.notify(event);
        }
    }
}
