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

use thiserror::Error;

use crate::{clock::ClockState, player::PlayerId, team::Team};

#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    #[error("build_teams: the {team} team has {count} players, it needs exactly 9")]
    RosterSize { team: Team, count: usize },
    #[error("substitution: {outgoing} players out but {incoming} players in")]
    ScheduleInconsistency { outgoing: usize, incoming: usize },
    #[error("substitution: the next lineup has {0} slots, it needs exactly 6")]
    LineupSize(usize),
    #[error("substitution: player {0} has no slot in this lineup")]
    Unslotted(PlayerId),
    #[error("schedule: the match number has to be 1 or more, got {0}")]
    InvalidMatchNumber(u32),
    #[error("schedule: a slot has to be from 1 to 9, got {0}")]
    InvalidSlot(u8),
    #[error("schedule: invalid rotation table: {0}")]
    InvalidTable(String),
    #[error("schedule: the {0} table has no field lineups")]
    NoLineup(String),
    #[error("roster: the teams are already built")]
    RosterLocked,
    #[error("roster: there is no player {0}")]
    UnknownPlayer(PlayerId),
    #[error("roster: a player needs a name")]
    EmptyName,
    #[error("roster: a level has to be from 1 to 3, got {0}")]
    InvalidLevel(u8),
    #[error("session: build the teams first")]
    TeamsNotBuilt,
    #[error("session: no match is in progress")]
    NoMatch,
    #[error("clock: can't {action} while {state}")]
    ClockState {
        action: &'static str,
        state: ClockState,
    },
}
