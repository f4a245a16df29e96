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

//! Keeper and lineup rotation.
//!
//! A [`RotationTable`] maps a match to a row of slot numbers. The first two
//! slots of a row are the first-half and second-half keepers. Field-lineup
//! tables carry four more slots, and the six together are the players on the
//! field for that match. The table repeats every `len` matches, so a
//! tournament can go on for as long as people want to play.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::ScheduleError, team::Half};

pub const SQUAD_SIZE: u8 = 9;
pub const SQUAD_LEN: usize = 9;
pub const FIELD_SIZE: usize = 6;
pub const BENCH_SIZE: usize = 3;

const KEEPER_PAIR: [[u8; 2]; 8] = [
    [1, 2],
    [3, 9],
    [7, 8],
    [4, 5],
    [7, 9],
    [6, 8],
    [3, 5],
    [1, 4],
];

const FIELD_LINEUP: [[u8; 6]; 8] = [
    [1, 2, 3, 4, 5, 6],
    [3, 9, 1, 4, 7, 8],
    [7, 8, 2, 5, 6, 9],
    [4, 5, 1, 2, 3, 6],
    [7, 9, 1, 3, 4, 8],
    [6, 8, 2, 5, 7, 9],
    [3, 5, 1, 2, 6, 4],
    [1, 4, 3, 7, 8, 9],
];

/// A marking number from 1 to 9, a player's fixed place in the rotation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Slot(u8);

impl Slot {
    /// # Errors
    ///
    /// If the slot is not from 1 to 9.
    pub fn new(slot: u8) -> Result<Self, ScheduleError> {
        if (1..=SQUAD_SIZE).contains(&slot) {
            Ok(Self(slot))
        } else {
            Err(ScheduleError::InvalidSlot(slot))
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// The zero based index into a squad.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn all() -> impl Iterator<Item = Slot> {
        (1..=SQUAD_SIZE).map(Slot)
    }
}

impl TryFrom<u8> for Slot {
    type Error = ScheduleError;

    fn try_from(slot: u8) -> Result<Self, Self::Error> {
        Self::new(slot)
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum TablePreset {
    KeeperPair,
    #[default]
    FieldLineup,
}

impl fmt::Display for TablePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeeperPair => write!(f, "keeper_pair"),
            Self::FieldLineup => write!(f, "field_lineup"),
        }
    }
}

impl FromStr for TablePreset {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string {
            "keeper_pair" | "keeper-pair" => Ok(Self::KeeperPair),
            "field_lineup" | "field-lineup" => Ok(Self::FieldLineup),
            _ => Err(anyhow::Error::msg(format!(
                "expected 'keeper_pair' or 'field_lineup', got '{string}'"
            ))),
        }
    }
}

// Serialize only: a table has to pass through `new` to be trusted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RotationTable {
    name: String,
    rows: Vec<Vec<Slot>>,
}

impl RotationTable {
    /// Builds a table from raw rows.
    ///
    /// # Errors
    ///
    /// If there are no rows, the rows differ in width, a row is not 2 or 6
    /// wide, a row repeats a slot, or a slot is not from 1 to 9.
    pub fn new(name: &str, rows: &[&[u8]]) -> Result<Self, ScheduleError> {
        let Some(width) = rows.first().map(|row| row.len()) else {
            return Err(ScheduleError::InvalidTable(format!("{name} has no rows")));
        };

        if width != 2 && width != FIELD_SIZE {
            return Err(ScheduleError::InvalidTable(format!(
                "{name} rows are {width} wide, expected 2 or {FIELD_SIZE}"
            )));
        }

        let mut slot_rows = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ScheduleError::InvalidTable(format!(
                    "{name} row {} is {} wide, expected {width}",
                    index + 1,
                    row.len()
                )));
            }

            let slots = row
                .iter()
                .map(|slot| Slot::new(*slot))
                .collect::<Result<Vec<_>, _>>()?;

            let distinct: BTreeSet<_> = slots.iter().collect();
            if distinct.len() != slots.len() {
                return Err(ScheduleError::InvalidTable(format!(
                    "{name} row {} repeats a slot",
                    index + 1
                )));
            }

            slot_rows.push(slots);
        }

        Ok(Self {
            name: name.to_string(),
            rows: slot_rows,
        })
    }

    #[must_use]
    pub fn keeper_pair() -> Self {
        Self::from_rows("keeper_pair", &KEEPER_PAIR)
    }

    #[must_use]
    pub fn field_lineup() -> Self {
        Self::from_rows("field_lineup", &FIELD_LINEUP)
    }

    #[must_use]
    pub fn preset(preset: TablePreset) -> Self {
        match preset {
            TablePreset::KeeperPair => Self::keeper_pair(),
            TablePreset::FieldLineup => Self::field_lineup(),
        }
    }

    // The presets are known to be valid.
    fn from_rows<const N: usize>(name: &str, rows: &[[u8; N]]) -> Self {
        Self {
            name: name.to_string(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|slot| Slot(*slot)).collect())
                .collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the rows list whole lineups and not just keeper pairs.
    #[must_use]
    pub fn has_lineups(&self) -> bool {
        self.rows.first().is_some_and(|row| row.len() == FIELD_SIZE)
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Slot>] {
        &self.rows
    }
}

impl Default for RotationTable {
    fn default() -> Self {
        Self::field_lineup()
    }
}

impl fmt::Display for RotationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        for (index, row) in self.rows.iter().enumerate() {
            let slots = row
                .iter()
                .map(|slot| slot.get().to_string())
                .collect::<Vec<_>>()
                .join(",");

            write!(f, "{}: [{slots}]", index + 1)?;
            if index + 1 < self.rows.len() {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

/// Answers who keeps goal and who plays for any match of a tournament.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RotationScheduler {
    table: RotationTable,
}

impl RotationScheduler {
    #[must_use]
    pub fn new(table: RotationTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &RotationTable {
        &self.table
    }

    /// The index of the row that applies to a match. Match 1 is row 0.
    fn index(&self, match_number: u32) -> Result<usize, ScheduleError> {
        if match_number < 1 {
            return Err(ScheduleError::InvalidMatchNumber(match_number));
        }

        Ok((match_number as usize - 1) % self.table.len())
    }

    fn row(&self, match_number: u32) -> Result<&[Slot], ScheduleError> {
        Ok(&self.table.rows[self.index(match_number)?])
    }

    /// The 1-based table row used for a match, which differs from the match
    /// number once the schedule has wrapped.
    ///
    /// # Errors
    ///
    /// If `match_number` is 0.
    pub fn schedule_match(&self, match_number: u32) -> Result<usize, ScheduleError> {
        Ok(self.index(match_number)? + 1)
    }

    /// The keeper slot for each team. Both teams always share the slot.
    ///
    /// # Errors
    ///
    /// If `match_number` is 0.
    pub fn keeper_for_half(
        &self,
        match_number: u32,
        half: Half,
    ) -> Result<(Slot, Slot), ScheduleError> {
        let slot = self.row(match_number)?[half.index()];
        Ok((slot, slot))
    }

    /// The six slots on the field for a match.
    ///
    /// # Errors
    ///
    /// If `match_number` is 0 or the table only has keeper pairs.
    pub fn lineup_for_match(&self, match_number: u32) -> Result<BTreeSet<Slot>, ScheduleError> {
        let row = self.row(match_number)?;
        if row.len() != FIELD_SIZE {
            return Err(ScheduleError::NoLineup(self.table.name.clone()));
        }

        Ok(row.iter().copied().collect())
    }

    /// The three slots on the bench for a match.
    ///
    /// # Errors
    ///
    /// If `match_number` is 0 or the table only has keeper pairs.
    pub fn bench_for_match(&self, match_number: u32) -> Result<BTreeSet<Slot>, ScheduleError> {
        let lineup = self.lineup_for_match(match_number)?;
        Ok(Slot::all().filter(|slot| !lineup.contains(slot)).collect())
    }

    /// The keeper who comes in next: the second half of this match, or the
    /// first half of the next one.
    ///
    /// # Errors
    ///
    /// If `match_number` is 0.
    pub fn next_keeper_slot(
        &self,
        match_number: u32,
        current_half: Half,
    ) -> Result<Slot, ScheduleError> {
        let index = self.index(match_number)?;

        Ok(match current_half {
            Half::First => self.table.rows[index][Half::Second.index()],
            Half::Second => {
                self.table.rows[(index + 1) % self.table.len()][Half::First.index()]
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid_tables() {
        for table in [RotationTable::keeper_pair(), RotationTable::field_lineup()] {
            let rows: Vec<Vec<u8>> = table
                .rows()
                .iter()
                .map(|row| row.iter().map(|slot| slot.get()).collect())
                .collect();
            let rows: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();

            let rebuilt = RotationTable::new(table.name(), &rows).unwrap();
            assert_eq!(rebuilt, table);
        }
    }

    #[test]
    fn lineup_rows_start_with_the_keeper_pair() {
        let keepers = RotationTable::keeper_pair();
        let lineups = RotationTable::field_lineup();

        for (pair, lineup) in keepers.rows().iter().zip(lineups.rows()) {
            assert_eq!(pair.as_slice(), &lineup[..2]);
        }
    }

    #[test]
    fn bad_tables() {
        assert!(matches!(
            RotationTable::new("empty", &[]),
            Err(ScheduleError::InvalidTable(_))
        ));
        assert!(matches!(
            RotationTable::new("wide", &[&[1, 2, 3]]),
            Err(ScheduleError::InvalidTable(_))
        ));
        assert!(matches!(
            RotationTable::new("ragged", &[&[1, 2], &[1, 2, 3, 4, 5, 6]]),
            Err(ScheduleError::InvalidTable(_))
        ));
        assert!(matches!(
            RotationTable::new("repeat", &[&[1, 1, 2, 3, 4, 5]]),
            Err(ScheduleError::InvalidTable(_))
        ));
        assert_eq!(
            RotationTable::new("ten", &[&[1, 10]]),
            Err(ScheduleError::InvalidSlot(10))
        );
    }

    #[test]
    fn match_zero_is_rejected() {
        let scheduler = RotationScheduler::default();
        assert_eq!(
            scheduler.keeper_for_half(0, Half::First),
            Err(ScheduleError::InvalidMatchNumber(0))
        );
        assert_eq!(
            scheduler.lineup_for_match(0),
            Err(ScheduleError::InvalidMatchNumber(0))
        );
        assert_eq!(
            scheduler.next_keeper_slot(0, Half::Second),
            Err(ScheduleError::InvalidMatchNumber(0))
        );
    }

    #[test]
    fn slot_serde_rejects_out_of_range() {
        assert!(ron::from_str::<Slot>("9").is_ok());
        assert!(ron::from_str::<Slot>("0").is_err());
    }
}
