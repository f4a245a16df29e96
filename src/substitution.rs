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

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::ScheduleError,
    lineup::Lineup,
    player::PlayerId,
    roster::RosterStore,
    rotation::{BENCH_SIZE, FIELD_SIZE, Slot},
    team::Team,
};

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Substitution {
    pub team: Team,
    pub outgoing: Vec<PlayerId>,
    pub incoming: Vec<PlayerId>,
}

impl Substitution {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |ids: &[PlayerId]| {
            ids.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };

        write!(
            f,
            "{} out [{}] in [{}]",
            self.team,
            join(&self.outgoing),
            join(&self.incoming)
        )
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum SubstitutionStrategy {
    /// Follow the field-lineup table.
    #[default]
    RotationTable,
    /// Rest the three players with the most minutes.
    PlayTime,
}

impl fmt::Display for SubstitutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RotationTable => write!(f, "rotation_table"),
            Self::PlayTime => write!(f, "play_time"),
        }
    }
}

impl FromStr for SubstitutionStrategy {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string {
            "rotation_table" | "rotation-table" | "table" => Ok(Self::RotationTable),
            "play_time" | "play-time" | "time" => Ok(Self::PlayTime),
            _ => Err(anyhow::Error::msg(format!(
                "expected 'rotation_table' or 'play_time', got '{string}'"
            ))),
        }
    }
}

/// Works out who comes off and who comes on so that exactly `next_slots` are
/// on the field.
///
/// # Errors
///
/// If `next_slots` is not six slots, a player has no slot, or the number going
/// off does not match the number coming on.
pub fn plan_substitution<F>(
    team: Team,
    on_field: &[PlayerId],
    bench: &[PlayerId],
    next_slots: &BTreeSet<Slot>,
    slot_of: F,
) -> Result<Substitution, ScheduleError>
where
    F: Fn(PlayerId) -> Option<Slot>,
{
    if next_slots.len() != FIELD_SIZE {
        return Err(ScheduleError::LineupSize(next_slots.len()));
    }

    let mut outgoing = Vec::new();
    for id in on_field {
        let slot = slot_of(*id).ok_or(ScheduleError::Unslotted(*id))?;
        if !next_slots.contains(&slot) {
            outgoing.push(*id);
        }
    }

    let mut incoming = Vec::new();
    for id in bench {
        let slot = slot_of(*id).ok_or(ScheduleError::Unslotted(*id))?;
        if next_slots.contains(&slot) {
            incoming.push(*id);
        }
    }

    if outgoing.len() != incoming.len() {
        return Err(ScheduleError::ScheduleInconsistency {
            outgoing: outgoing.len(),
            incoming: incoming.len(),
        });
    }

    Ok(Substitution {
        team,
        outgoing,
        incoming,
    })
}

/// The three on the field with the most minutes go off, the three on the
/// bench with the fewest come on. Ties go to the lower slot.
#[must_use]
pub fn suggest_by_play_time(lineup: &Lineup, roster: &RosterStore) -> Substitution {
    let played = |slot: &Slot| roster.stats(lineup.player(*slot)).total_seconds();

    let mut field = lineup.on_field().to_vec();
    field.sort_by(|a, b| played(b).cmp(&played(a)).then(a.cmp(b)));

    let mut bench = lineup.bench();
    bench.sort_by(|a, b| played(a).cmp(&played(b)).then(a.cmp(b)));

    let swaps = BENCH_SIZE.min(field.len()).min(bench.len());

    Substitution {
        team: lineup.team(),
        outgoing: field[..swaps]
            .iter()
            .map(|slot| lineup.player(*slot))
            .collect(),
        incoming: bench[..swaps]
            .iter()
            .map(|slot| lineup.player(*slot))
            .collect(),
    }
}
