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

/// The two bibs. Yellow is always team A and blue is always team B.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Team {
    #[default]
    Yellow,
    Blue,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::Yellow, Team::Blue];
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Yellow => write!(f, "yellow"),
            Team::Blue => write!(f, "blue"),
        }
    }
}

impl FromStr for Team {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        let string = string.to_lowercase();

        match string.as_str() {
            "a" | "y" | "yellow" => Ok(Self::Yellow),
            "b" | "blue" => Ok(Self::Blue),
            _ => Err(anyhow::Error::msg(format!(
                "Error trying to convert '{string}' to a Team!"
            ))),
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Half {
    #[default]
    First,
    Second,
}

impl Half {
    /// The position of this half's keeper in a rotation table row.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Half::First => write!(f, "1"),
            Half::Second => write!(f, "2"),
        }
    }
}

impl FromStr for Half {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string {
            "1" | "first" => Ok(Self::First),
            "2" | "second" => Ok(Self::Second),
            _ => Err(anyhow::Error::msg(format!(
                "expected a half of 1 or 2, got '{string}'"
            ))),
        }
    }
}
