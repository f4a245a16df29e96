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

#[cfg(feature = "bench")]
use std::{hint::black_box, time::Duration};

#[cfg(feature = "bench")]
use criterion::{Criterion, criterion_group, criterion_main};

#[cfg(feature = "bench")]
use futsal_rotation::{
    clock::ClockSettings, rotation::RotationTable, session::Session,
    substitution::SubstitutionStrategy,
};

#[cfg(feature = "bench")]
fn hundred_matches() {
    let mut session = Session::new(
        RotationTable::field_lineup(),
        ClockSettings::debug(),
        SubstitutionStrategy::RotationTable,
    );
    session.read_line("sample_roster", 0).unwrap();
    session.read_line("build_teams", 0).unwrap();

    for match_number in 1..=100 {
        let start = match_number * 100_000;
        if match_number > 1 {
            session.read_line("apply_substitutions", start).unwrap();
        }
        session.read_line("start_match", start).unwrap();
        session.read_line("tick", start + 6_000).unwrap();
        session.read_line("keeper_change", start + 6_000).unwrap();
        session.read_line("end_match", start + 12_000).unwrap();
    }

    black_box(session);
}

#[cfg(feature = "bench")]
fn tournament(c: &mut Criterion) {
    c.bench_function("hundred_matches", |b| b.iter(hundred_matches));
}

#[cfg(feature = "bench")]
criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = tournament
}

#[cfg(feature = "bench")]
criterion_main!(benches);

#[cfg(not(feature = "bench"))]
fn main() {
    eprintln!("You must enable pass `--features=bench`");
}
