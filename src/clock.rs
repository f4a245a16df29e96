// This file is part of futsal-rotation.
//
// futsal-rotation is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// futsal-rotation is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The match clock.
//!
//! ```text
//! Idle -> Running <-> Paused
//!         Running -> KeeperChangePending -> Running
//!         Running -> MatchEnded
//! ```
//!
//! The clock never reads the system time itself. Every call takes `now` in
//! unix milliseconds and the clock advances by the real time since the last
//! call, so a late tick does not make the match run long.

use std::{fmt, str::FromStr};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{error::ScheduleError, team::Half, utils::format_time};

const SECOND: u64 = 1_000;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ClockSettings {
    keeper_interval_seconds: u64,
    match_duration_seconds: u64,
}

impl ClockSettings {
    /// # Errors
    ///
    /// If the interval is zero or the match does not end within the second
    /// keeper interval.
    pub fn new(keeper_interval_seconds: u64, match_duration_seconds: u64) -> anyhow::Result<Self> {
        if keeper_interval_seconds == 0 {
            return Err(anyhow::Error::msg(
                "clock: the keeper interval has to be at least one second",
            ));
        }

        if match_duration_seconds <= keeper_interval_seconds
            || match_duration_seconds > 2 * keeper_interval_seconds
        {
            return Err(anyhow::Error::msg(format!(
                "clock: a match with a {keeper_interval_seconds}s keeper interval has to last \
                 more than {keeper_interval_seconds}s and at most {}s",
                2 * keeper_interval_seconds
            )));
        }

        Ok(Self {
            keeper_interval_seconds,
            match_duration_seconds,
        })
    }

    /// Six second halves, for trying things out.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            keeper_interval_seconds: 6,
            match_duration_seconds: 12,
        }
    }

    /// Seven minute halves.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            keeper_interval_seconds: 7 * 60,
            match_duration_seconds: 14 * 60,
        }
    }

    #[must_use]
    pub fn keeper_interval_seconds(&self) -> u64 {
        self.keeper_interval_seconds
    }

    #[must_use]
    pub fn match_duration_seconds(&self) -> u64 {
        self.match_duration_seconds
    }
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for ClockSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "keeper {} match {}",
            format_time(self.keeper_interval_seconds),
            format_time(self.match_duration_seconds)
        )
    }
}

impl FromStr for ClockSettings {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        let err_msg = "expected: 'debug', 'standard' or 'KEEPER_SECONDS:MATCH_SECONDS'";

        match string {
            "debug" => Ok(Self::debug()),
            "standard" => Ok(Self::standard()),
            _ => {
                let Some((keeper, duration)) = string.split_once(':') else {
                    return Err(anyhow::Error::msg(err_msg));
                };

                let keeper = keeper
                    .parse::<u64>()
                    .context("clock: the keeper interval is not an integer")?;
                let duration = duration
                    .parse::<u64>()
                    .context("clock: the match duration is not an integer")?;

                Self::new(keeper, duration)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum ClockState {
    #[default]
    Idle,
    Running,
    Paused,
    KeeperChangePending,
    MatchEnded,
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
            Self::KeeperChangePending => write!(f, "keeper_change_pending"),
            Self::MatchEnded => write!(f, "match_ended"),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ClockEvent {
    KeeperIntervalElapsed { half: Half, elapsed_seconds: u64 },
    MatchDurationElapsed { elapsed_seconds: u64 },
}

impl fmt::Display for ClockEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeeperIntervalElapsed {
                half,
                elapsed_seconds,
            } => write!(
                f,
                "keeper_interval_elapsed {half} {}",
                format_time(*elapsed_seconds)
            ),
            Self::MatchDurationElapsed { elapsed_seconds } => {
                write!(f, "match_duration_elapsed {}", format_time(*elapsed_seconds))
            }
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchClock {
    settings: ClockSettings,
    state: ClockState,
    half: Half,
    elapsed_milliseconds: u64,
    last_tick: Option<i64>,
}

impl MatchClock {
    #[must_use]
    pub fn new(settings: ClockSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn settings(&self) -> ClockSettings {
        self.settings
    }

    #[must_use]
    pub fn state(&self) -> ClockState {
        self.state
    }

    #[must_use]
    pub fn half(&self) -> Half {
        self.half
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_milliseconds / SECOND
    }

    fn require_state(
        &self,
        action: &'static str,
        states: &[ClockState],
    ) -> Result<(), ScheduleError> {
        if states.contains(&self.state) {
            Ok(())
        } else {
            Err(ScheduleError::ClockState {
                action,
                state: self.state,
            })
        }
    }

    /// # Errors
    ///
    /// If the clock is not idle.
    pub fn start(&mut self, now: i64) -> Result<(), ScheduleError> {
        self.require_state("start", &[ClockState::Idle])?;
        self.state = ClockState::Running;
        self.last_tick = Some(now);
        Ok(())
    }

    /// Counts the time up to `now`, then stops.
    ///
    /// # Errors
    ///
    /// If the clock is not running.
    pub fn pause(&mut self, now: i64) -> Result<Vec<ClockEvent>, ScheduleError> {
        self.require_state("pause", &[ClockState::Running])?;
        let events = self.tick(now);
        if self.state == ClockState::Running {
            self.state = ClockState::Paused;
        }
        self.last_tick = None;
        Ok(events)
    }

    /// # Errors
    ///
    /// If the clock is not paused.
    pub fn resume(&mut self, now: i64) -> Result<(), ScheduleError> {
        self.require_state("resume", &[ClockState::Paused])?;
        self.state = ClockState::Running;
        self.last_tick = Some(now);
        Ok(())
    }

    /// Starts the second half.
    ///
    /// # Errors
    ///
    /// If no keeper change is pending.
    pub fn confirm_keeper_change(&mut self, now: i64) -> Result<(), ScheduleError> {
        self.require_state("change keepers", &[ClockState::KeeperChangePending])?;
        self.half = Half::Second;
        self.state = ClockState::Running;
        self.last_tick = Some(now);
        Ok(())
    }

    /// Ends the match early, or acknowledges the final whistle.
    pub fn end(&mut self) {
        self.state = ClockState::MatchEnded;
        self.last_tick = None;
    }

    /// Back to zero and idle, keeping the settings.
    pub fn reset(&mut self) {
        *self = Self::new(self.settings);
    }

    /// Advances a running clock to `now`. A tick that jumps past a keeper
    /// change or the end of the match stops exactly on it.
    pub fn tick(&mut self, now: i64) -> Vec<ClockEvent> {
        if self.state != ClockState::Running {
            return Vec::new();
        }

        let last_tick = self.last_tick.unwrap_or(now);
        let delta = u64::try_from(now.saturating_sub(last_tick)).unwrap_or(0);
        self.last_tick = Some(now);

        let interval = self.settings.keeper_interval_seconds * SECOND;
        let duration = self.settings.match_duration_seconds * SECOND;
        let boundary = ((self.elapsed_milliseconds / interval + 1) * interval).min(duration);
        let elapsed = self.elapsed_milliseconds + delta;

        if elapsed < boundary {
            self.elapsed_milliseconds = elapsed;
            return Vec::new();
        }

        self.elapsed_milliseconds = boundary;
        self.last_tick = None;
        let elapsed_seconds = self.elapsed_seconds();

        if boundary >= duration {
            self.state = ClockState::MatchEnded;
            vec![ClockEvent::MatchDurationElapsed { elapsed_seconds }]
        } else {
            self.state = ClockState::KeeperChangePending;
            vec![ClockEvent::KeeperIntervalElapsed {
                half: self.half,
                elapsed_seconds,
            }]
        }
    }
}

impl fmt::Display for MatchClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} half {} {}",
            format_time(self.elapsed_seconds()),
            format_time(self.settings.match_duration_seconds),
            self.half,
            self.state
        )
    }
}
