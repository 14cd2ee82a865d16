/// Game driver: plays a sequence of levels to completion.
///
/// Levels are played in order. A lost level is replayed from a fresh parse,
/// a won level advances to the next one, and the run is complete once the
/// last level is won.
///
/// Nothing steers the player here, so the driver is bounded: each attempt
/// stops after `max_ticks_per_attempt` frames, and a level is abandoned after
/// `max_attempts` losses. A timed-out attempt ends the run immediately since
/// replaying it would change nothing.

use serde::Serialize;

use crate::config::SpeedConfig;
use crate::error::GameError;
use super::event::GameEvent;
use super::level::Level;
use super::levels::LevelDef;
use super::parser::LevelParser;
use super::status::Status;
use super::step::step;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum AttemptOutcome {
    Won,
    Lost,
    TimedOut,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttemptReport {
    pub outcome: AttemptOutcome,
    pub ticks: u32,
    pub coins_collected: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LevelReport {
    pub name: String,
    pub attempts: Vec<AttemptReport>,
}

impl LevelReport {
    pub fn won(&self) -> bool {
        self.attempts.last().is_some_and(|a| a.outcome == AttemptOutcome::Won)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameReport {
    pub levels: Vec<LevelReport>,
    pub completed: bool,
}

/// Drive one level until it reports finished (or the tick budget runs out).
/// `on_frame` sees the level after every frame, with that frame's events.
pub fn run_level<F>(level: &mut Level, speed: &SpeedConfig, mut on_frame: F) -> AttemptReport
where
    F: FnMut(&Level, &[GameEvent]),
{
    let mut ticks = 0;
    let mut coins_collected = 0;

    while !level.is_finished() {
        if ticks >= speed.max_ticks_per_attempt {
            return AttemptReport { outcome: AttemptOutcome::TimedOut, ticks, coins_collected };
        }
        let events = step(level, speed.frame_seconds, speed.max_step);
        coins_collected += events
            .iter()
            .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
            .count();
        ticks += 1;
        on_frame(level, &events);
    }

    let outcome = match level.status() {
        Some(Status::Won) => AttemptOutcome::Won,
        Some(Status::Lost) | None => AttemptOutcome::Lost,
    };
    AttemptReport { outcome, ticks, coins_collected }
}

/// Check every plan up front so a broken level fails before anything runs.
pub fn validate(plans: &[LevelDef], parser: &LevelParser) -> Result<(), GameError> {
    if plans.is_empty() {
        return Err(GameError::NoLevels);
    }
    for (idx, plan) in plans.iter().enumerate() {
        if plan.rows.is_empty() {
            return Err(GameError::EmptyLevel { level: idx + 1 });
        }
        if parser.parse(&plan.rows).player().is_none() {
            return Err(GameError::MissingPlayer { level: idx + 1 });
        }
    }
    Ok(())
}

pub fn run_game<F>(
    plans: &[LevelDef],
    parser: &LevelParser,
    speed: &SpeedConfig,
    mut on_frame: F,
) -> Result<GameReport, GameError>
where
    F: FnMut(&Level, &[GameEvent]),
{
    validate(plans, parser)?;

    let mut levels = Vec::with_capacity(plans.len());

    for (idx, plan) in plans.iter().enumerate() {
        let mut report = LevelReport { name: plan.name.clone(), attempts: vec![] };

        for attempt in 1..=speed.max_attempts {
            let mut level = parser.parse(&plan.rows);
            let result = run_level(&mut level, speed, &mut on_frame);
            log::info!(
                "level {} '{}' attempt {}: {:?} after {} ticks",
                idx + 1, plan.name, attempt, result.outcome, result.ticks,
            );
            let outcome = result.outcome;
            report.attempts.push(result);
            if outcome != AttemptOutcome::Lost {
                break;
            }
        }

        let won = report.won();
        levels.push(report);
        if !won {
            log::warn!("giving up on level {} '{}'", idx + 1, plan.name);
            return Ok(GameReport { levels, completed: false });
        }
    }

    Ok(GameReport { levels, completed: true })
}
