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

use std::str::FromStr;

use anyhow::Context;

use crate::{
    clock::ClockSettings,
    player::{Level, PlayerId},
    rotation::TablePreset,
    substitution::SubstitutionStrategy,
    team::{Half, Team},
    team_builder::Criterion,
};

pub const COMMANDS: [&str; 33] = [
    "add_player",
    "apply_substitutions",
    "build_teams",
    "clock",
    "delete_player",
    "disband_teams",
    "end_match",
    "history",
    "keeper_change",
    "keeper_for_half",
    "known_command",
    "lineup_for_match",
    "list_commands",
    "name",
    "next_keeper",
    "pause",
    "plan_substitutions",
    "players",
    "protocol_version",
    "quit",
    "reset_clock",
    "resume",
    "sample_roster",
    "score",
    "show",
    "snapshot",
    "start_match",
    "stats",
    "strategy",
    "table",
    "teams",
    "tick",
    "version",
];

/// A line of the session text protocol.
///
/// Replies start with `=` on success and `?` on failure. Everything after a
/// `#` is a comment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    /// `add_player NAME LEVEL TEAM`, the name may contain spaces.
    AddPlayer(String, Level, Team),
    /// `score TEAM DELTA`
    AdjustScore(Team, i32),
    ApplySubstitutions,
    /// `build_teams [id_order|play_time]`
    BuildTeams(Criterion),
    /// `clock debug|standard|KEEPER_SECONDS:MATCH_SECONDS`
    Clock(ClockSettings),
    DeletePlayer(PlayerId),
    DisbandTeams,
    Empty,
    EndMatch,
    History,
    KeeperChange,
    /// `keeper_for_half MATCH HALF`
    KeeperForHalf(u32, Half),
    KnownCommand(String),
    /// `lineup_for_match MATCH`, prints the field then the bench.
    LineupForMatch(u32),
    ListCommands,
    Name,
    /// `next_keeper MATCH HALF`
    NextKeeper(u32, Half),
    Pause,
    PlanSubstitutions,
    Players,
    ProtocolVersion,
    Quit,
    ResetClock,
    Resume,
    SampleRoster,
    Show,
    /// The whole session as RON.
    Snapshot,
    StartMatch,
    Stats,
    Strategy(SubstitutionStrategy),
    Table(TablePreset),
    Teams,
    Tick,
    Version,
}

fn match_number(args: &[&str], index: usize) -> anyhow::Result<u32> {
    args.get(index)
        .context("expected a match number")?
        .parse::<u32>()
        .context("the match number is not an integer")
}

fn half(args: &[&str], index: usize) -> anyhow::Result<Half> {
    Half::from_str(args.get(index).context("expected a half of 1 or 2")?)
}

impl FromStr for Message {
    type Err = anyhow::Error;

    fn from_str(message: &str) -> anyhow::Result<Self> {
        let args: Vec<&str> = message.split_ascii_whitespace().collect();

        let Some(command) = args.first() else {
            return Ok(Self::Empty);
        };

        match *command {
            "add_player" => {
                let err_msg = "expected: 'add_player NAME LEVEL TEAM'";
                if args.len() < 4 {
                    return Err(anyhow::Error::msg(err_msg));
                }

                let team = Team::from_str(args[args.len() - 1])?;
                let level = Level::from_str(args[args.len() - 2])?;
                let name = args[1..args.len() - 2].join(" ");

                Ok(Self::AddPlayer(name, level, team))
            }
            "apply_substitutions" => Ok(Self::ApplySubstitutions),
            "build_teams" => match args.get(1) {
                Some(criterion) => Ok(Self::BuildTeams(Criterion::from_str(criterion)?)),
                None => Ok(Self::BuildTeams(Criterion::default())),
            },
            "clock" => {
                let settings = args
                    .get(1)
                    .context("expected: 'clock debug|standard|KEEPER_SECONDS:MATCH_SECONDS'")?;
                Ok(Self::Clock(ClockSettings::from_str(settings)?))
            }
            "delete_player" => {
                let id = args.get(1).context("expected: 'delete_player ID'")?;
                Ok(Self::DeletePlayer(PlayerId::from_str(id)?))
            }
            "disband_teams" => Ok(Self::DisbandTeams),
            "end_match" => Ok(Self::EndMatch),
            "history" => Ok(Self::History),
            "keeper_change" => Ok(Self::KeeperChange),
            "keeper_for_half" => Ok(Self::KeeperForHalf(
                match_number(&args, 1)?,
                half(&args, 2)?,
            )),
            "known_command" => {
                let command = args.get(1).context("expected: 'known_command COMMAND'")?;
                Ok(Self::KnownCommand((*command).to_string()))
            }
            "lineup_for_match" => Ok(Self::LineupForMatch(match_number(&args, 1)?)),
            "list_commands" => Ok(Self::ListCommands),
            "name" => Ok(Self::Name),
            "next_keeper" => Ok(Self::NextKeeper(match_number(&args, 1)?, half(&args, 2)?)),
            "pause" => Ok(Self::Pause),
            "plan_substitutions" => Ok(Self::PlanSubstitutions),
            "players" => Ok(Self::Players),
            "protocol_version" => Ok(Self::ProtocolVersion),
            "quit" => Ok(Self::Quit),
            "reset_clock" => Ok(Self::ResetClock),
            "resume" => Ok(Self::Resume),
            "sample_roster" => Ok(Self::SampleRoster),
            "score" => {
                let err_msg = "expected: 'score TEAM DELTA'";
                if args.len() < 3 {
                    return Err(anyhow::Error::msg(err_msg));
                }

                let delta = args[2]
                    .trim_start_matches('+')
                    .parse::<i32>()
                    .context("score: the delta is not an integer")?;

                Ok(Self::AdjustScore(Team::from_str(args[1])?, delta))
            }
            "show" => Ok(Self::Show),
            "snapshot" => Ok(Self::Snapshot),
            "start_match" => Ok(Self::StartMatch),
            "stats" => Ok(Self::Stats),
            "strategy" => {
                let strategy = args
                    .get(1)
                    .context("expected: 'strategy rotation_table|play_time'")?;
                Ok(Self::Strategy(SubstitutionStrategy::from_str(strategy)?))
            }
            "table" => {
                let preset = args
                    .get(1)
                    .context("expected: 'table keeper_pair|field_lineup'")?;
                Ok(Self::Table(TablePreset::from_str(preset)?))
            }
            "teams" => Ok(Self::Teams),
            "tick" => Ok(Self::Tick),
            "version" => Ok(Self::Version),
            text => Err(anyhow::Error::msg(format!("unrecognized command: '{text}'"))),
        }
    }
}
