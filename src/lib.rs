//! Keeper and lineup rotation for informal futsal sessions.
//!
//! Eighteen players wear yellow or blue bibs. Each colour is numbered 1 to 9
//! once, and from then on a fixed table says who keeps goal in each half and
//! which six of the nine are on the field. The table repeats every eight
//! matches, so everyone keeps goal and sits out about as often as everyone
//! else however long people keep playing.
//!
//! * [`rotation`] - the tables and the [`RotationScheduler`](rotation::RotationScheduler)
//! * [`substitution`] - who comes off and who comes on between matches
//! * [`team_builder`] - splitting the roster and handing out slots
//! * [`clock`] - the match clock
//! * [`session`] - the state an organizer works with, and the text protocol
//!
//! ## Message Protocol
//!
//! The `futsal-text-protocol` binary reads one [`Message`](message::Message)
//! per line and answers `= ...` or `? ...`.

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

#![deny(clippy::panic)]

pub mod clock;
pub mod error;
pub mod lineup;
pub mod message;
pub mod player;
pub mod roster;
pub mod rotation;
pub mod score;
pub mod session;
pub mod substitution;
pub mod team;
pub mod team_builder;
pub mod utils;

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2026 Developers of the futsal-rotation project

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, fmt, str::FromStr};

    use super::*;
    use clock::{ClockEvent, ClockSettings, ClockState, MatchClock};
    use error::ScheduleError;
    use lineup::Lineup;
    use message::Message;
    use player::{Level, PlayerId};
    use roster::RosterStore;
    use rotation::{RotationScheduler, RotationTable, Slot};
    use score::{Score, Winner};
    use session::Session;
    use substitution::{SubstitutionStrategy, plan_substitution, suggest_by_play_time};
    use team::{Half, Team};
    use team_builder::{Criterion, build_teams};

    fn assert_error_str<T: fmt::Debug>(result: anyhow::Result<T>, string: &str) {
        assert!(result.is_err(), "expected the error '{string}', got {result:?}");
        if let Err(error) = result {
            assert_eq!(error.to_string(), string);
        }
    }

    fn slots(values: &[u8]) -> BTreeSet<Slot> {
        values.iter().map(|slot| Slot::new(*slot).unwrap()).collect()
    }

    fn ids(values: &[u32]) -> Vec<PlayerId> {
        values.iter().map(|id| PlayerId(*id)).collect()
    }

    fn keeper_pair() -> RotationScheduler {
        RotationScheduler::new(RotationTable::keeper_pair())
    }

    fn field_lineup() -> RotationScheduler {
        RotationScheduler::new(RotationTable::field_lineup())
    }

    fn squad(first_id: u32) -> [PlayerId; 9] {
        let mut squad = [PlayerId::default(); 9];
        for (index, id) in squad.iter_mut().enumerate() {
            *id = PlayerId(first_id + u32::try_from(index).unwrap());
        }
        squad
    }

    #[test]
    fn first_match_keepers() -> anyhow::Result<()> {
        let scheduler = keeper_pair();
        let (a, b) = scheduler.keeper_for_half(1, Half::First)?;
        assert_eq!((a.get(), b.get()), (1, 1));

        let (a, b) = scheduler.keeper_for_half(1, Half::Second)?;
        assert_eq!((a.get(), b.get()), (2, 2));

        Ok(())
    }

    #[test]
    fn ninth_match_wraps_to_the_first() -> anyhow::Result<()> {
        for scheduler in [keeper_pair(), field_lineup()] {
            for half in [Half::First, Half::Second] {
                assert_eq!(
                    scheduler.keeper_for_half(9, half)?,
                    scheduler.keeper_for_half(1, half)?
                );
            }
            assert_eq!(scheduler.schedule_match(9)?, 1);
            assert_eq!(scheduler.schedule_match(16)?, 8);
        }

        Ok(())
    }

    #[test]
    fn rotation_is_symmetric_and_repeats_every_eight() -> anyhow::Result<()> {
        let scheduler = keeper_pair();
        for match_number in 1..=64 {
            for half in [Half::First, Half::Second] {
                let (a, b) = scheduler.keeper_for_half(match_number, half)?;
                assert_eq!(a, b);
                assert_eq!(
                    scheduler.keeper_for_half(match_number + 8, half)?,
                    (a, b)
                );
            }
        }

        Ok(())
    }

    #[test]
    fn keeper_pair_table_is_exact() -> anyhow::Result<()> {
        let scheduler = keeper_pair();
        let expected = [(1, 2), (3, 9), (7, 8), (4, 5), (7, 9), (6, 8), (3, 5), (1, 4)];

        for (match_number, (first, second)) in (1..).zip(expected) {
            assert_eq!(scheduler.keeper_for_half(match_number, Half::First)?.0.get(), first);
            assert_eq!(scheduler.keeper_for_half(match_number, Half::Second)?.0.get(), second);
        }

        Ok(())
    }

    #[test]
    fn every_lineup_is_six_distinct_slots() -> anyhow::Result<()> {
        let scheduler = field_lineup();
        for match_number in 1..=40 {
            let lineup = scheduler.lineup_for_match(match_number)?;
            assert_eq!(lineup.len(), 6);
            assert!(lineup.iter().all(|slot| (1..=9).contains(&slot.get())));

            let bench = scheduler.bench_for_match(match_number)?;
            assert_eq!(bench.len(), 3);
            assert!(bench.is_disjoint(&lineup));
        }

        Ok(())
    }

    #[test]
    fn second_match_lineup() -> anyhow::Result<()> {
        let scheduler = field_lineup();
        assert_eq!(scheduler.lineup_for_match(2)?, slots(&[3, 9, 1, 4, 7, 8]));
        assert_eq!(scheduler.bench_for_match(2)?, slots(&[2, 5, 6]));
        Ok(())
    }

    #[test]
    fn keeper_table_has_no_lineups() {
        assert_eq!(
            keeper_pair().lineup_for_match(1),
            Err(ScheduleError::NoLineup("keeper_pair".to_string()))
        );
        assert!(!RotationTable::keeper_pair().has_lineups());
        assert!(RotationTable::field_lineup().has_lineups());
    }

    #[test]
    fn everyone_keeps_and_rests_over_eight_matches() -> anyhow::Result<()> {
        let scheduler = field_lineup();
        let mut keeps = [0; 9];
        let mut rests = [0; 9];

        for match_number in 1..=8 {
            for half in [Half::First, Half::Second] {
                keeps[scheduler.keeper_for_half(match_number, half)?.0.index()] += 1;
            }
            for slot in scheduler.bench_for_match(match_number)? {
                rests[slot.index()] += 1;
            }
        }

        assert_eq!(keeps.iter().sum::<i32>(), 16);
        assert!(keeps.iter().all(|count| *count >= 1));
        assert_eq!(rests.iter().sum::<i32>(), 24);
        assert!(rests.iter().all(|count| *count >= 2));

        Ok(())
    }

    #[test]
    fn next_keeper() -> anyhow::Result<()> {
        let scheduler = keeper_pair();
        assert_eq!(scheduler.next_keeper_slot(1, Half::First)?.get(), 2);
        assert_eq!(scheduler.next_keeper_slot(1, Half::Second)?.get(), 3);
        // The last match of the table rolls over to the first.
        assert_eq!(scheduler.next_keeper_slot(8, Half::Second)?.get(), 1);
        Ok(())
    }

    #[test]
    fn build_by_id_order() -> anyhow::Result<()> {
        let roster = RosterStore::sample();
        let teams = build_teams(&roster, Criterion::IdOrder)?;

        assert_eq!(teams.yellow.on_field_players(), ids(&[1, 2, 3, 4, 5, 6]));
        assert_eq!(teams.yellow.bench_players(), ids(&[7, 8, 9]));
        assert_eq!(
            teams.blue.on_field_players(),
            ids(&[10, 11, 12, 13, 14, 15])
        );
        assert_eq!(teams.blue.bench_players(), ids(&[16, 17, 18]));
        assert_eq!(teams.blue.slot_of(PlayerId(10)), Slot::new(1).ok());

        Ok(())
    }

    #[test]
    fn build_by_play_time_puts_the_rested_on_first() -> anyhow::Result<()> {
        let mut roster = RosterStore::sample();
        for (id, seconds) in [(1, 300), (2, 200), (3, 100)] {
            roster.stats_mut(PlayerId(id)).field_seconds = seconds;
        }
        roster.stats_mut(PlayerId(4)).keeper_seconds = 50;

        let teams = build_teams(&roster, Criterion::PlayTime)?;
        assert_eq!(
            teams.yellow.squad().as_slice(),
            ids(&[5, 6, 7, 8, 9, 4, 3, 2, 1]).as_slice()
        );
        assert_eq!(teams.yellow.bench_players(), ids(&[3, 2, 1]));

        Ok(())
    }

    #[test]
    fn eight_and_ten_is_a_roster_size_error() -> anyhow::Result<()> {
        let mut roster = RosterStore::sample();
        roster.delete_player(PlayerId(9))?;
        roster.add_player("Extra", Level::Two, Team::Blue)?;

        assert_eq!(
            build_teams(&roster, Criterion::IdOrder),
            Err(ScheduleError::RosterSize {
                team: Team::Yellow,
                count: 8
            })
        );

        Ok(())
    }

    #[test]
    fn roster_ids_and_names() -> anyhow::Result<()> {
        let mut roster = RosterStore::default();
        assert_eq!(roster.add_player("  Ana ", Level::One, Team::Yellow)?, PlayerId(1));
        assert_eq!(roster.add_player("Bo", Level::Three, Team::Blue)?, PlayerId(2));
        assert_eq!(roster.get(PlayerId(1)).map(|p| p.name.as_str()), Some("Ana"));
        assert_eq!(
            roster.add_player("   ", Level::One, Team::Blue),
            Err(ScheduleError::EmptyName)
        );

        roster.delete_player(PlayerId(1))?;
        assert_eq!(roster.add_player("Cy", Level::Two, Team::Yellow)?, PlayerId(3));
        assert_eq!(
            roster.delete_player(PlayerId(1)),
            Err(ScheduleError::UnknownPlayer(PlayerId(1)))
        );

        roster.lock();
        assert_eq!(
            roster.delete_player(PlayerId(2)),
            Err(ScheduleError::RosterLocked)
        );

        Ok(())
    }

    #[test]
    fn substitution_round_trip() -> anyhow::Result<()> {
        let scheduler = field_lineup();
        let mut lineup = Lineup::new(Team::Blue, squad(10));

        for match_number in 2..=17 {
            let next = scheduler.lineup_for_match(match_number)?;
            let substitution = lineup.plan_for(&next)?;
            assert_eq!(substitution.outgoing.len(), substitution.incoming.len());

            lineup.apply(&substitution)?;
            let on_field: BTreeSet<Slot> = lineup.on_field().iter().copied().collect();
            assert_eq!(on_field, next);

            let expected: BTreeSet<PlayerId> = next.iter().map(|slot| lineup.player(*slot)).collect();
            let actual: BTreeSet<PlayerId> = lineup.on_field_players().into_iter().collect();
            assert_eq!(actual, expected);
        }

        Ok(())
    }

    #[test]
    fn first_to_second_match() -> anyhow::Result<()> {
        let lineup = Lineup::new(Team::Yellow, squad(1));
        let substitution = lineup.plan_for(&field_lineup().lineup_for_match(2)?)?;

        assert_eq!(substitution.outgoing, ids(&[2, 5, 6]));
        assert_eq!(substitution.incoming, ids(&[7, 8, 9]));
        assert_eq!(substitution.to_string(), "yellow out [2 5 6] in [7 8 9]");

        Ok(())
    }

    #[test]
    fn unbalanced_plans_are_rejected() {
        let on_field = ids(&[1, 2, 3, 4, 5, 6, 7]);
        let bench = ids(&[8, 9]);
        let slot_of = |id: PlayerId| Slot::new(u8::try_from(id.0).ok()?).ok();

        assert_eq!(
            plan_substitution(Team::Yellow, &on_field, &bench, &slots(&[1, 2, 3, 4, 5, 6]), slot_of),
            Err(ScheduleError::ScheduleInconsistency {
                outgoing: 1,
                incoming: 0
            })
        );

        assert_eq!(
            plan_substitution(Team::Yellow, &on_field, &bench, &slots(&[1, 2, 3]), slot_of),
            Err(ScheduleError::LineupSize(3))
        );

        let stranger = ids(&[1, 2, 3, 4, 5, 60]);
        assert_eq!(
            plan_substitution(Team::Yellow, &stranger, &bench, &slots(&[1, 2, 3, 4, 5, 6]), slot_of),
            Err(ScheduleError::Unslotted(PlayerId(60)))
        );
    }

    #[test]
    fn apply_is_all_or_nothing() {
        let mut lineup = Lineup::new(Team::Yellow, squad(1));
        let before = lineup.clone();

        let bad = substitution::Substitution {
            team: Team::Yellow,
            outgoing: ids(&[1, 7]),
            incoming: ids(&[8, 9]),
        };
        assert!(lineup.apply(&bad).is_err());
        assert_eq!(lineup, before);

        let uneven = substitution::Substitution {
            team: Team::Yellow,
            outgoing: ids(&[1]),
            incoming: ids(&[8, 9]),
        };
        assert_eq!(
            lineup.apply(&uneven),
            Err(ScheduleError::ScheduleInconsistency {
                outgoing: 1,
                incoming: 2
            })
        );
        assert_eq!(lineup, before);

        let twice_out = substitution::Substitution {
            team: Team::Yellow,
            outgoing: ids(&[1, 1]),
            incoming: ids(&[7, 8]),
        };
        assert_eq!(
            lineup.apply(&twice_out),
            Err(ScheduleError::ScheduleInconsistency {
                outgoing: 2,
                incoming: 2
            })
        );
        assert_eq!(lineup, before);

        let twice_in = substitution::Substitution {
            team: Team::Yellow,
            outgoing: ids(&[1, 2]),
            incoming: ids(&[7, 7]),
        };
        assert!(lineup.apply(&twice_in).is_err());
        assert_eq!(lineup, before);
        assert_eq!(lineup.on_field().len(), 6);
    }

    #[test]
    fn sample_roster_is_two_full_teams() {
        let roster = RosterStore::sample();
        assert_eq!(roster.len(), 18);
        assert_eq!(roster.players_on(Team::Yellow).len(), 9);
        assert_eq!(roster.players_on(Team::Blue).len(), 9);

        let first_blue = roster.get(PlayerId(10)).unwrap();
        assert_eq!(first_blue.name, "Blue1");
        assert_eq!(first_blue.level, Level::One);
        assert_eq!(roster.get(PlayerId(1)).map(|p| p.level), Some(Level::Three));
    }

    #[test]
    fn play_time_suggestion() {
        let mut roster = RosterStore::sample();
        for (id, seconds) in [(1, 50), (2, 400), (3, 300), (4, 200), (5, 10), (6, 100)] {
            roster.stats_mut(PlayerId(id)).field_seconds = seconds;
        }
        roster.stats_mut(PlayerId(9)).keeper_seconds = 90;

        let lineup = Lineup::new(Team::Yellow, squad(1));
        let substitution = suggest_by_play_time(&lineup, &roster);

        assert_eq!(substitution.outgoing, ids(&[2, 3, 4]));
        assert_eq!(substitution.incoming, ids(&[7, 8, 9]));
    }

    #[test]
    fn clock_stops_for_the_keeper_change_and_the_whistle() -> anyhow::Result<()> {
        let mut clock = MatchClock::new(ClockSettings::debug());
        clock.start(0)?;

        assert!(clock.tick(1_000).is_empty());
        assert!(clock.tick(5_999).is_empty());
        assert_eq!(clock.elapsed_seconds(), 5);

        assert_eq!(
            clock.tick(6_000),
            vec![ClockEvent::KeeperIntervalElapsed {
                half: Half::First,
                elapsed_seconds: 6
            }]
        );
        assert_eq!(clock.state(), ClockState::KeeperChangePending);
        assert!(clock.tick(60_000).is_empty());
        assert_eq!(clock.elapsed_seconds(), 6);

        clock.confirm_keeper_change(100_000)?;
        assert_eq!(clock.half(), Half::Second);
        assert_eq!(
            clock.tick(106_000),
            vec![ClockEvent::MatchDurationElapsed {
                elapsed_seconds: 12
            }]
        );
        assert_eq!(clock.state(), ClockState::MatchEnded);

        Ok(())
    }

    #[test]
    fn a_late_tick_does_not_skip_the_keeper_change() -> anyhow::Result<()> {
        let mut clock = MatchClock::new(ClockSettings::standard());
        clock.start(1_000)?;

        // The host slept for ten minutes.
        let events = clock.tick(601_000);
        assert_eq!(
            events,
            vec![ClockEvent::KeeperIntervalElapsed {
                half: Half::First,
                elapsed_seconds: 420
            }]
        );
        assert_eq!(clock.elapsed_seconds(), 420);

        Ok(())
    }

    #[test]
    fn clock_counts_real_time_not_ticks() -> anyhow::Result<()> {
        let mut clock = MatchClock::new(ClockSettings::standard());
        clock.start(0)?;

        let mut now = 0;
        for _ in 0..100 {
            now += 1_300;
            clock.tick(now);
        }
        assert_eq!(clock.elapsed_seconds(), 130);

        clock.pause(now + 700)?;
        assert_eq!(clock.elapsed_seconds(), 130);
        assert!(clock.tick(now + 50_000).is_empty());
        clock.resume(now + 60_000)?;
        clock.tick(now + 62_000);
        assert_eq!(clock.elapsed_seconds(), 132);

        Ok(())
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() -> anyhow::Result<()> {
        let mut clock = MatchClock::new(ClockSettings::debug());
        clock.start(i64::MIN)?;
        assert_eq!(
            clock.tick(i64::MAX),
            vec![ClockEvent::KeeperIntervalElapsed {
                half: Half::First,
                elapsed_seconds: 6
            }]
        );

        let mut clock = MatchClock::new(ClockSettings::debug());
        clock.start(i64::MAX)?;
        assert!(clock.tick(i64::MIN).is_empty());
        assert_eq!(clock.elapsed_seconds(), 0);

        Ok(())
    }

    #[test]
    fn clock_transitions_are_checked() {
        let mut clock = MatchClock::new(ClockSettings::debug());
        assert_eq!(
            clock.resume(0),
            Err(ScheduleError::ClockState {
                action: "resume",
                state: ClockState::Idle
            })
        );
        assert!(clock.confirm_keeper_change(0).is_err());
        assert!(clock.start(0).is_ok());
        assert!(clock.start(0).is_err());
    }

    #[test]
    fn score_never_goes_negative() {
        let mut score = Score::default();
        score.adjust(Team::Yellow, -1);
        assert_eq!(score.yellow, 0);

        score.adjust(Team::Blue, 2);
        score.adjust(Team::Blue, -1);
        score.adjust(Team::Yellow, 3);
        assert_eq!(score.to_string(), "3:1");
        assert_eq!(score.winner(), Winner::Yellow);
    }

    #[test]
    fn a_session_of_two_matches() -> anyhow::Result<()> {
        let mut session = Session::new(
            RotationTable::field_lineup(),
            ClockSettings::debug(),
            SubstitutionStrategy::RotationTable,
        );
        session.load_sample_roster()?;
        session.build_teams(Criterion::IdOrder)?;

        let state = session.start_match(0)?;
        assert_eq!((state.match_number, state.keeper_slot_yellow.get()), (1, 1));
        assert_eq!(session.keeper(Team::Blue), Some(PlayerId(10)));

        session.adjust_score(Team::Blue, 1)?;
        assert_eq!(session.score(), Score { yellow: 0, blue: 1 });
        assert_eq!(session.tick(6_000).len(), 1);
        assert_eq!(session.match_state().map(|state| state.elapsed_seconds), Some(6));
        let state = session.complete_keeper_change(6_500)?;
        assert_eq!(state.keeper_slot_blue.get(), 2);
        assert_eq!(session.keeper(Team::Yellow), Some(PlayerId(2)));

        session.tick(12_500);
        let entry = session.end_match(12_500)?;
        assert_eq!(entry.winner, Winner::Blue);
        assert_eq!(session.current_match(), 2);

        // Slot 1 kept the first half and slot 2 the second.
        let roster = session.roster();
        assert_eq!(roster.stats(PlayerId(1)).keeper_seconds, 6);
        assert_eq!(roster.stats(PlayerId(1)).field_seconds, 6);
        assert_eq!(roster.stats(PlayerId(2)).keeper_seconds, 6);
        assert_eq!(roster.stats(PlayerId(3)).field_seconds, 12);
        assert_eq!(roster.stats(PlayerId(7)).total_seconds(), 0);
        assert_eq!(roster.stats(PlayerId(3)).total_games, 1);
        assert_eq!(roster.stats(PlayerId(7)).total_games, 0);

        let substitutions = session.apply_substitutions()?;
        assert_eq!(substitutions.len(), 2);
        assert_eq!(substitutions[1].outgoing, ids(&[11, 14, 15]));

        let state = session.start_match(20_000)?;
        assert_eq!(state.keeper_slot_yellow.get(), 3);
        assert_eq!(session.keeper(Team::Yellow), Some(PlayerId(3)));
        assert_eq!(session.roster().stats(PlayerId(7)).total_games, 1);

        Ok(())
    }

    #[test]
    fn session_guards() -> anyhow::Result<()> {
        let mut session = Session::default();
        assert_eq!(session.start_match(0).err(), Some(ScheduleError::TeamsNotBuilt));
        assert_eq!(session.end_match(0).err(), Some(ScheduleError::NoMatch));
        assert_eq!(session.adjust_score(Team::Yellow, 1).err(), Some(ScheduleError::NoMatch));
        assert_eq!(
            session.build_teams(Criterion::IdOrder).err(),
            Some(ScheduleError::RosterSize {
                team: Team::Yellow,
                count: 0
            })
        );

        session.load_sample_roster()?;
        session.build_teams(Criterion::IdOrder)?;
        assert_eq!(
            session.add_player("Late", Level::One, Team::Blue),
            Err(ScheduleError::RosterLocked)
        );

        session.start_match(0)?;
        assert!(session.start_match(1).is_err());
        assert!(session.apply_substitutions().is_err());
        assert!(session.disband_teams().is_err());

        session.end_match(1_000)?;
        session.disband_teams()?;
        session.add_player("Late", Level::One, Team::Blue)?;

        Ok(())
    }

    #[test]
    fn protocol_commands() -> anyhow::Result<()> {
        let mut session = Session::default();

        assert_eq!(session.read_line("# just a comment", 0)?, None);
        assert_eq!(
            session.read_line("keeper_for_half 9 2", 0)?,
            Some("2 2".to_string())
        );
        assert_eq!(
            session.read_line("lineup_for_match 2", 0)?,
            Some("1 3 4 7 8 9 | 2 5 6".to_string())
        );
        assert_eq!(session.read_line("next_keeper 8 2", 0)?, Some("1".to_string()));
        assert_eq!(
            session.read_line("add_player Jo Ann 2 blue", 0)?,
            Some("1".to_string())
        );
        assert_eq!(
            session.read_line("known_command tick", 0)?,
            Some("true".to_string())
        );
        assert_eq!(
            session.read_line("clock 5:9", 0)?,
            Some("keeper 0:05 match 0:09".to_string())
        );
        assert_eq!(session.clock().settings(), ClockSettings::new(5, 9)?);
        session.read_line("strategy play_time", 0)?;
        assert_eq!(session.strategy(), SubstitutionStrategy::PlayTime);
        session.read_line("table keeper_pair", 0)?;
        assert_eq!(session.scheduler().table().name(), "keeper_pair");

        assert_error_str(
            session.read_line("keeper_for_half 0 1", 0),
            "schedule: the match number has to be 1 or more, got 0",
        );
        assert_error_str(session.read_line("dance", 0), "unrecognized command: 'dance'");
        assert_error_str(
            session.read_line("score yellow 1", 0),
            "session: no match is in progress",
        );

        Ok(())
    }

    #[test]
    fn parse_messages() -> anyhow::Result<()> {
        assert_eq!(
            Message::from_str("add_player Kim Min Su lv3 y")?,
            Message::AddPlayer("Kim Min Su".to_string(), Level::Three, Team::Yellow)
        );
        assert_eq!(
            Message::from_str("score blue +2")?,
            Message::AdjustScore(Team::Blue, 2)
        );
        assert_eq!(
            Message::from_str("build_teams play_time")?,
            Message::BuildTeams(Criterion::PlayTime)
        );
        assert_eq!(Message::from_str("   ")?, Message::Empty);
        assert!(Message::from_str("add_player 2 blue").is_err());
        assert!(Message::from_str("next_keeper 1 3").is_err());

        Ok(())
    }
}
