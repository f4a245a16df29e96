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

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::ScheduleError,
    player::{Level, Player, PlayerId, PlayerStats},
    team::Team,
};

const SAMPLE_LEVELS: [(Team, Level); 18] = [
    (Team::Yellow, Level::Three),
    (Team::Yellow, Level::Two),
    (Team::Yellow, Level::Two),
    (Team::Yellow, Level::One),
    (Team::Yellow, Level::Three),
    (Team::Yellow, Level::Two),
    (Team::Yellow, Level::One),
    (Team::Yellow, Level::Two),
    (Team::Yellow, Level::Three),
    (Team::Blue, Level::One),
    (Team::Blue, Level::Two),
    (Team::Blue, Level::One),
    (Team::Blue, Level::Three),
    (Team::Blue, Level::Two),
    (Team::Blue, Level::One),
    (Team::Blue, Level::Two),
    (Team::Blue, Level::Three),
    (Team::Blue, Level::One),
];

/// Every registered player and the time they have played. Lineups point in
/// here by [`PlayerId`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct RosterStore {
    players: Vec<Player>,
    stats: FxHashMap<PlayerId, PlayerStats>,
    locked: bool,
}

impl RosterStore {
    /// Nine yellow players with ids 1 to 9 and nine blue with ids 10 to 18.
    #[must_use]
    pub fn sample() -> Self {
        let mut roster = Self::default();
        let mut numbers = FxHashMap::default();

        for (team, level) in SAMPLE_LEVELS {
            let number: &mut u32 = numbers.entry(team).or_default();
            *number += 1;

            let name = match team {
                Team::Yellow => format!("Yellow{number}"),
                Team::Blue => format!("Blue{number}"),
            };
            roster.insert_player(name, level, team);
        }

        roster
    }

    /// Registers a player with the next free id.
    ///
    /// # Errors
    ///
    /// If the teams are already built or the name is blank.
    pub fn add_player(
        &mut self,
        name: &str,
        level: Level,
        team: Team,
    ) -> Result<PlayerId, ScheduleError> {
        if self.locked {
            return Err(ScheduleError::RosterLocked);
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(ScheduleError::EmptyName);
        }

        Ok(self.insert_player(name.to_string(), level, team))
    }

    fn insert_player(&mut self, name: String, level: Level, team: Team) -> PlayerId {
        let id = PlayerId(
            self.players
                .iter()
                .map(|player| player.id.0)
                .max()
                .unwrap_or(0)
                + 1,
        );

        self.players.push(Player {
            id,
            name,
            level,
            team,
        });
        self.stats.insert(id, PlayerStats::default());

        id
    }

    /// # Errors
    ///
    /// If the teams are already built or there is no such player.
    pub fn delete_player(&mut self, id: PlayerId) -> Result<Player, ScheduleError> {
        if self.locked {
            return Err(ScheduleError::RosterLocked);
        }

        let Some(index) = self.players.iter().position(|player| player.id == id) else {
            return Err(ScheduleError::UnknownPlayer(id));
        };

        self.stats.remove(&id);
        Ok(self.players.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    #[must_use]
    pub fn name(&self, id: PlayerId) -> &str {
        self.get(id).map_or("-", |player| player.name.as_str())
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// A team's players in registration order.
    #[must_use]
    pub fn players_on(&self, team: Team) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|player| player.team == team)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn stats(&self, id: PlayerId) -> PlayerStats {
        self.stats.get(&id).copied().unwrap_or_default()
    }

    pub fn stats_mut(&mut self, id: PlayerId) -> &mut PlayerStats {
        self.stats.entry(id).or_default()
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl fmt::Display for RosterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let players = self
            .players
            .iter()
            .map(|player| format!("{player} {}", self.stats(player.id)))
            .collect::<Vec<_>>()
            .join("\n");

        write!(f, "{players}")
    }
}
