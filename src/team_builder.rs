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

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::ScheduleError,
    lineup::Lineup,
    player::PlayerId,
    roster::RosterStore,
    rotation::SQUAD_LEN,
    team::Team,
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Criterion {
    #[default]
    IdOrder,
    PlayTime,
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdOrder => write!(f, "id_order"),
            Self::PlayTime => write!(f, "play_time"),
        }
    }
}

impl FromStr for Criterion {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string {
            "id" | "id_order" | "id-order" => Ok(Self::IdOrder),
            "time" | "play_time" | "play-time" => Ok(Self::PlayTime),
            _ => Err(anyhow::Error::msg(format!(
                "expected 'id_order' or 'play_time', got '{string}'"
            ))),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Teams {
    pub yellow: Lineup,
    pub blue: Lineup,
}

impl Teams {
    #[must_use]
    pub fn get(&self, team: Team) -> &Lineup {
        match team {
            Team::Yellow => &self.yellow,
            Team::Blue => &self.blue,
        }
    }

    pub fn get_mut(&mut self, team: Team) -> &mut Lineup {
        match team {
            Team::Yellow => &mut self.yellow,
            Team::Blue => &mut self.blue,
        }
    }
}

impl fmt::Display for Teams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.yellow)?;
        write!(f, "{}", self.blue)
    }
}

/// Splits the roster into two squads of nine and numbers them. A player's
/// slot is their rank after sorting and stays fixed for the tournament.
///
/// # Errors
///
/// If either team does not have exactly nine players.
pub fn build_teams(roster: &RosterStore, criterion: Criterion) -> Result<Teams, ScheduleError> {
    Ok(Teams {
        yellow: build_squad(roster, Team::Yellow, criterion)?,
        blue: build_squad(roster, Team::Blue, criterion)?,
    })
}

fn build_squad(
    roster: &RosterStore,
    team: Team,
    criterion: Criterion,
) -> Result<Lineup, ScheduleError> {
    let mut ids: Vec<PlayerId> = roster
        .players_on(team)
        .iter()
        .map(|player| player.id)
        .collect();

    if ids.len() != SQUAD_LEN {
        return Err(ScheduleError::RosterSize {
            team,
            count: ids.len(),
        });
    }

    ids.sort_unstable();
    if criterion == Criterion::PlayTime {
        // Stable, so equal time keeps id order.
        ids.sort_by_key(|id| roster.stats(*id).total_seconds());
    }

    let mut squad = [PlayerId::default(); SQUAD_LEN];
    squad.copy_from_slice(&ids);

    Ok(Lineup::new(team, squad))
}
