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

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    error::ScheduleError,
    player::PlayerId,
    rotation::{FIELD_SIZE, SQUAD_LEN, Slot},
    substitution::{Substitution, plan_substitution},
    team::Team,
};

/// A squad of nine. Players are held by id, the roster owns the records.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Lineup {
    team: Team,
    squad: [PlayerId; SQUAD_LEN],
    on_field: Vec<Slot>,
}

impl Lineup {
    /// `squad[0]` gets slot 1 and so on. Slots 1 to 6 start on the field.
    #[must_use]
    pub fn new(team: Team, squad: [PlayerId; SQUAD_LEN]) -> Self {
        Self {
            team,
            squad,
            on_field: Slot::all().take(FIELD_SIZE).collect(),
        }
    }

    #[must_use]
    pub fn team(&self) -> Team {
        self.team
    }

    #[must_use]
    pub fn squad(&self) -> &[PlayerId; SQUAD_LEN] {
        &self.squad
    }

    #[must_use]
    pub fn player(&self, slot: Slot) -> PlayerId {
        self.squad[slot.index()]
    }

    #[must_use]
    pub fn slot_of(&self, id: PlayerId) -> Option<Slot> {
        Slot::all().find(|slot| self.player(*slot) == id)
    }

    #[must_use]
    pub fn on_field(&self) -> &[Slot] {
        &self.on_field
    }

    #[must_use]
    pub fn bench(&self) -> Vec<Slot> {
        Slot::all()
            .filter(|slot| !self.on_field.contains(slot))
            .collect()
    }

    #[must_use]
    pub fn is_on_field(&self, slot: Slot) -> bool {
        self.on_field.contains(&slot)
    }

    #[must_use]
    pub fn on_field_players(&self) -> Vec<PlayerId> {
        self.on_field.iter().map(|slot| self.player(*slot)).collect()
    }

    #[must_use]
    pub fn bench_players(&self) -> Vec<PlayerId> {
        self.bench().into_iter().map(|slot| self.player(slot)).collect()
    }

    /// The players that have to swap to put `next_slots` on the field.
    ///
    /// # Errors
    ///
    /// If `next_slots` is not six slots or the swap is unbalanced.
    pub fn plan_for(&self, next_slots: &BTreeSet<Slot>) -> Result<Substitution, ScheduleError> {
        plan_substitution(
            self.team,
            &self.on_field_players(),
            &self.bench_players(),
            next_slots,
            |id| self.slot_of(id),
        )
    }

    /// Applies a whole substitution or nothing at all.
    ///
    /// # Errors
    ///
    /// If the substitution is unbalanced, names a player twice, takes off
    /// someone who is not on the field, or brings on someone who is not on
    /// the bench.
    pub fn apply(&mut self, substitution: &Substitution) -> Result<(), ScheduleError> {
        let inconsistent = ScheduleError::ScheduleInconsistency {
            outgoing: substitution.outgoing.len(),
            incoming: substitution.incoming.len(),
        };

        if substitution.outgoing.len() != substitution.incoming.len() {
            return Err(inconsistent);
        }

        let mut outgoing = BTreeSet::new();
        for id in &substitution.outgoing {
            let slot = self.slot_of(*id).ok_or(ScheduleError::Unslotted(*id))?;
            if !self.is_on_field(slot) || !outgoing.insert(slot) {
                return Err(inconsistent);
            }
        }

        let mut incoming = BTreeSet::new();
        for id in &substitution.incoming {
            let slot = self.slot_of(*id).ok_or(ScheduleError::Unslotted(*id))?;
            if self.is_on_field(slot) || !incoming.insert(slot) {
                return Err(inconsistent);
            }
        }

        let mut on_field: Vec<Slot> = self
            .on_field
            .iter()
            .filter(|slot| !outgoing.contains(slot))
            .copied()
            .collect();
        on_field.extend(incoming);

        if on_field.len() != FIELD_SIZE {
            return Err(ScheduleError::LineupSize(on_field.len()));
        }

        self.on_field = on_field;
        Ok(())
    }
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self
            .on_field
            .iter()
            .map(|slot| format!("{slot}:{}", self.player(*slot)))
            .collect::<Vec<_>>()
            .join(" ");

        let bench = self
            .bench()
            .iter()
            .map(|slot| format!("{slot}:{}", self.player(*slot)))
            .collect::<Vec<_>>()
            .join(" ");

        write!(f, "{} field {field} bench {bench}", self.team)
    }
}
