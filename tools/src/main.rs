//! sim-runner: headless month runner for the kakei budget simulation.
//!
//! Usage:
//!   sim-runner --seed 42 --db month.db
//!   sim-runner --seed 42 --days 14
//!   sim-runner --config terms.json --json

use anyhow::Result;
use kakei_core::{
    config::SimConfig,
    engine::SimEngine,
    notify::Notifier,
    state::Interruption,
    store::SaveStore,
    types::{new_session_id, Day, Money},
};
use std::env;

#[derive(serde::Serialize)]
struct RunSummary {
    session_id: String,
    day: Day,
    money: Money,
    happiness: i32,
    stars: Option<u8>,
    message: Option<String>,
    badges: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let days = parse_arg(&args, "--days", u64::MAX);
    let json_output = args.iter().any(|a| a == "--json");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => SimConfig::load(&w[1])?,
        None => SimConfig::default(),
    };

    if !json_output {
        println!("kakei — sim-runner");
        println!("  seed:    {seed}");
        println!("  db:      {db}");
        println!("  started: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!();
    }

    let store = if db == ":memory:" {
        SaveStore::in_memory()?
    } else {
        SaveStore::open(db)?
    };
    store.migrate()?;

    let session_id = new_session_id();
    let final_day = config.final_day;
    let stop_day = final_day.min(days.min(u64::from(u32::MAX)) as Day);

    let mut engine = SimEngine::build(session_id.clone(), seed, config, store, Notifier::silent());
    engine.hydrate()?;

    let interactions = play_until(&mut engine, stop_day)?;
    log::info!("played to day {} in {interactions} interactions", engine.state().day);

    let outcome = if engine.state().day >= final_day {
        Some(engine.finish()?.0)
    } else {
        None
    };

    let state = engine.state();
    let summary = RunSummary {
        session_id,
        day: state.day,
        money: state.money,
        happiness: state.happiness,
        stars: outcome.as_ref().map(|o| o.stars),
        message: outcome.as_ref().map(|o| o.message.clone()),
        badges: state.achieved_badges.clone(),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("=== day {} ===", summary.day);
        println!("  money:     {}", summary.money);
        println!("  happiness: {}", summary.happiness);
        if let Some(stars) = summary.stars {
            println!("  stars:     {}", "★".repeat(stars as usize));
        }
        if let Some(message) = &summary.message {
            println!("  {message}");
        }
        if !summary.badges.is_empty() {
            println!("  badges:");
            for badge in &summary.badges {
                println!("    - {badge}");
            }
        }
    }

    engine.shutdown();
    Ok(())
}

/// Play to `stop_day` with a fixed frugal policy: decline every loan,
/// answer the first quiz option, take the cheapest event option.
/// Returns the number of interactions performed.
fn play_until(engine: &mut SimEngine, stop_day: Day) -> Result<u64> {
    let mut interactions = 0u64;
    loop {
        match engine.interruption().clone() {
            Interruption::None => {
                if engine.state().day >= stop_day {
                    break;
                }
                engine.advance_day()?;
            }
            Interruption::StandardOffer | Interruption::WildBoarOffer => {
                engine.decline_offer()?;
            }
            Interruption::Quiz { .. } => {
                engine.answer_quiz(0)?;
            }
            Interruption::Event { .. } => {
                let index = cheapest_option(engine);
                engine.choose_event_option(index)?;
            }
        }
        interactions += 1;
    }
    Ok(interactions)
}

/// The option with the smallest net outlay (cost minus reward).
fn cheapest_option(engine: &SimEngine) -> usize {
    let event = engine
        .current_event()
        .expect("event interruption without a catalog entry");
    event
        .options
        .iter()
        .enumerate()
        .min_by_key(|(_, o)| o.cost - o.reward)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn parse_arg(args: &[String], flag: &str, default: u64) -> u64 {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
