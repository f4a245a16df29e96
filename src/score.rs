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

use crate::team::Team;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Winner {
    Yellow,
    #[default]
    Draw,
    Blue,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yellow => write!(f, "yellow_wins"),
            Self::Draw => write!(f, "draw"),
            Self::Blue => write!(f, "blue_wins"),
        }
    }
}

impl FromStr for Winner {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value {
            "yellow_wins" | "Yellow" => Ok(Self::Yellow),
            "draw" | "Draw" => Ok(Self::Draw),
            "blue_wins" | "Blue" => Ok(Self::Blue),
            _ => Err(anyhow::Error::msg(format!("invalid winner: {value}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Score {
    pub yellow: u32,
    pub blue: u32,
}

impl Score {
    /// Adds `delta` goals to a team. A score never drops below zero.
    pub fn adjust(&mut self, team: Team, delta: i32) {
        let goals = match team {
            Team::Yellow => &mut self.yellow,
            Team::Blue => &mut self.blue,
        };

        *goals = goals.saturating_add_signed(delta);
    }

    #[must_use]
    pub fn winner(&self) -> Winner {
        match self.yellow.cmp(&self.blue) {
            std::cmp::Ordering::Greater => Winner::Yellow,
            std::cmp::Ordering::Equal => Winner::Draw,
            std::cmp::Ordering::Less => Winner::Blue,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.yellow, self.blue)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameHistoryEntry {
    pub match_number: u32,
    pub score_yellow: u32,
    pub score_blue: u32,
    pub winner: Winner,
}

impl GameHistoryEntry {
    #[must_use]
    pub fn new(match_number: u32, score: Score) -> Self {
        Self {
            match_number,
            score_yellow: score.yellow,
            score_blue: score.blue,
            winner: score.winner(),
        }
    }
}

impl fmt::Display for GameHistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{} {}",
            self.match_number, self.score_yellow, self.score_blue, self.winner
        )
    }
}

/// Finished matches, oldest first. Entries can be added but never changed.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct History(Vec<GameHistoryEntry>);

impl History {
    pub fn push(&mut self, entry: GameHistoryEntry) {
        self.0.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[GameHistoryEntry] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Matches won by yellow, by blue, and drawn.
    #[must_use]
    pub fn record(&self) -> (usize, usize, usize) {
        self.0
            .iter()
            .fold((0, 0, 0), |(yellow, blue, draws), entry| match entry.winner {
                Winner::Yellow => (yellow + 1, blue, draws),
                Winner::Blue => (yellow, blue + 1, draws),
                Winner::Draw => (yellow, blue, draws + 1),
            })
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        write!(f, "{entries}")
    }
}
