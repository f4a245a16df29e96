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

use std::{borrow::Cow, fmt, process::exit, str::FromStr};

use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    clock::{ClockEvent, ClockSettings, MatchClock},
    error::ScheduleError,
    message::{COMMANDS, Message},
    player::{Level, Player, PlayerId},
    roster::RosterStore,
    rotation::{RotationScheduler, RotationTable, Slot},
    score::{GameHistoryEntry, History, Score},
    substitution::{Substitution, SubstitutionStrategy, suggest_by_play_time},
    team::{Half, Team},
    team_builder::{Criterion, Teams, build_teams},
    utils::format_time,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct MatchState {
    pub match_number: u32,
    pub half: Half,
    pub elapsed_seconds: u64,
    pub keeper_slot_yellow: Slot,
    pub keeper_slot_blue: Slot,
}

impl MatchState {
    #[must_use]
    pub fn keeper_slot(&self, team: Team) -> Slot {
        match team {
            Team::Yellow => self.keeper_slot_yellow,
            Team::Blue => self.keeper_slot_blue,
        }
    }
}

/// Everything an organizer works with during a session. This is the only
/// place state changes; the scheduler and planner only read from it.
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    roster: RosterStore,
    teams: Option<Teams>,
    scheduler: RotationScheduler,
    clock: MatchClock,
    match_state: Option<MatchState>,
    current_match: u32,
    score: Score,
    history: History,
    strategy: SubstitutionStrategy,
    accrued_seconds: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            RotationTable::default(),
            ClockSettings::default(),
            SubstitutionStrategy::default(),
        )
    }
}

impl Session {
    #[must_use]
    pub fn new(
        table: RotationTable,
        clock_settings: ClockSettings,
        strategy: SubstitutionStrategy,
    ) -> Self {
        Self {
            roster: RosterStore::default(),
            teams: None,
            scheduler: RotationScheduler::new(table),
            clock: MatchClock::new(clock_settings),
            match_state: None,
            current_match: 1,
            score: Score::default(),
            history: History::default(),
            strategy,
            accrued_seconds: 0,
        }
    }

    #[must_use]
    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    #[must_use]
    pub fn teams(&self) -> Option<&Teams> {
        self.teams.as_ref()
    }

    #[must_use]
    pub fn scheduler(&self) -> &RotationScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn clock(&self) -> &MatchClock {
        &self.clock
    }

    #[must_use]
    pub fn match_state(&self) -> Option<&MatchState> {
        self.match_state.as_ref()
    }

    /// The match being played, or the next one to start.
    #[must_use]
    pub fn current_match(&self) -> u32 {
        self.current_match
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn strategy(&self) -> SubstitutionStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: SubstitutionStrategy) {
        self.strategy = strategy;
    }

    fn no_match_in_progress(&self, action: &'static str) -> Result<(), ScheduleError> {
        if self.match_state.is_some() {
            return Err(ScheduleError::ClockState {
                action,
                state: self.clock.state(),
            });
        }

        Ok(())
    }

    /// # Errors
    ///
    /// If a match is in progress.
    pub fn set_table(&mut self, table: RotationTable) -> Result<(), ScheduleError> {
        self.no_match_in_progress("change the table")?;
        info!("using the {} table", table.name());
        self.scheduler = RotationScheduler::new(table);
        Ok(())
    }

    /// # Errors
    ///
    /// If a match is in progress.
    pub fn set_clock_settings(&mut self, settings: ClockSettings) -> Result<(), ScheduleError> {
        self.no_match_in_progress("change the clock")?;
        self.clock = MatchClock::new(settings);
        Ok(())
    }

    /// # Errors
    ///
    /// If the teams are built or the name is blank.
    pub fn add_player(
        &mut self,
        name: &str,
        level: Level,
        team: Team,
    ) -> Result<PlayerId, ScheduleError> {
        let id = self.roster.add_player(name, level, team)?;
        debug!("added player {id} {name} to {team}");
        Ok(id)
    }

    /// # Errors
    ///
    /// If the teams are built or there is no such player.
    pub fn delete_player(&mut self, id: PlayerId) -> Result<Player, ScheduleError> {
        let player = self.roster.delete_player(id)?;
        debug!("deleted player {player}");
        Ok(player)
    }

    /// Replaces the roster with the eighteen sample players.
    ///
    /// # Errors
    ///
    /// If the teams are built.
    pub fn load_sample_roster(&mut self) -> Result<(), ScheduleError> {
        if self.roster.is_locked() {
            return Err(ScheduleError::RosterLocked);
        }

        self.roster = RosterStore::sample();
        Ok(())
    }

    /// Numbers both squads and locks the roster.
    ///
    /// # Errors
    ///
    /// If the teams are already built or a team is not exactly nine players.
    pub fn build_teams(&mut self, criterion: Criterion) -> Result<&Teams, ScheduleError> {
        if self.teams.is_some() {
            return Err(ScheduleError::RosterLocked);
        }

        let teams = build_teams(&self.roster, criterion)?;
        self.roster.lock();
        info!("built teams by {criterion}");

        Ok(&*self.teams.insert(teams))
    }

    /// Drops the squads so the roster can be edited and the teams rebuilt.
    /// Played time and history are kept.
    ///
    /// # Errors
    ///
    /// If a match is in progress.
    pub fn disband_teams(&mut self) -> Result<(), ScheduleError> {
        self.no_match_in_progress("disband the teams")?;
        self.teams = None;
        self.roster.unlock();
        Ok(())
    }

    /// Kicks off the current match with the first half keepers.
    ///
    /// # Errors
    ///
    /// If the teams are not built or a match is already in progress.
    pub fn start_match(&mut self, now: i64) -> Result<&MatchState, ScheduleError> {
        self.no_match_in_progress("start a match")?;
        let Some(teams) = &self.teams else {
            return Err(ScheduleError::TeamsNotBuilt);
        };

        let match_number = self.current_match;
        let (keeper_slot_yellow, keeper_slot_blue) =
            self.scheduler.keeper_for_half(match_number, Half::First)?;
        let (_, second_half) = self.scheduler.keeper_for_half(match_number, Half::Second)?;

        if let Ok(lineup) = self.scheduler.lineup_for_match(match_number) {
            for team in Team::BOTH {
                let on_field = teams.get(team).on_field();
                if on_field.len() != lineup.len()
                    || !on_field.iter().all(|slot| lineup.contains(slot))
                {
                    warn!("match {match_number}: the {team} lineup does not follow the table");
                }
            }
        }

        let on_field: Vec<PlayerId> = Team::BOTH
            .iter()
            .flat_map(|team| teams.get(*team).on_field_players())
            .collect();
        for id in on_field {
            self.roster.stats_mut(id).total_games += 1;
        }

        self.score = Score::default();
        self.accrued_seconds = 0;
        self.clock.reset();
        self.clock.start(now)?;

        info!(
            "match {match_number} (schedule match {}): keepers {keeper_slot_yellow} -> {second_half}",
            self.scheduler.schedule_match(match_number)?
        );

        Ok(&*self.match_state.insert(MatchState {
            match_number,
            half: Half::First,
            elapsed_seconds: 0,
            keeper_slot_yellow,
            keeper_slot_blue,
        }))
    }

    fn sync_match_state(&mut self) {
        if let Some(state) = &mut self.match_state {
            state.elapsed_seconds = self.clock.elapsed_seconds();
            state.half = self.clock.half();
        }
    }

    fn log_events(events: &[ClockEvent]) {
        for event in events {
            info!("{event}");
        }
    }

    /// Advances the clock to `now`.
    pub fn tick(&mut self, now: i64) -> Vec<ClockEvent> {
        let events = self.clock.tick(now);
        self.sync_match_state();
        debug!("tick {}", self.clock);
        Self::log_events(&events);
        events
    }

    /// # Errors
    ///
    /// If the clock is not running.
    pub fn pause(&mut self, now: i64) -> Result<Vec<ClockEvent>, ScheduleError> {
        let events = self.clock.pause(now)?;
        self.sync_match_state();
        Self::log_events(&events);
        Ok(events)
    }

    /// # Errors
    ///
    /// If the clock is not paused.
    pub fn resume(&mut self, now: i64) -> Result<(), ScheduleError> {
        self.clock.resume(now)
    }

    /// Restarts the clock from zero with the first half keepers. Time already
    /// credited to players stays credited.
    ///
    /// # Errors
    ///
    /// If no match is in progress.
    pub fn reset_clock(&mut self, now: i64) -> Result<(), ScheduleError> {
        let Some(state) = &mut self.match_state else {
            return Err(ScheduleError::NoMatch);
        };

        let (yellow, blue) = self
            .scheduler
            .keeper_for_half(state.match_number, Half::First)?;
        state.keeper_slot_yellow = yellow;
        state.keeper_slot_blue = blue;

        self.clock.reset();
        self.clock.start(now)?;
        self.accrued_seconds = 0;
        info!("match {}: clock restarted", state.match_number);
        self.sync_match_state();
        Ok(())
    }

    /// Credits the time since the last credit: keeper time to each keeper and
    /// field time to everyone else on the field.
    fn accrue(&mut self) {
        let (Some(state), Some(teams)) = (&self.match_state, &self.teams) else {
            return;
        };

        let elapsed = self.clock.elapsed_seconds();
        let segment = elapsed.saturating_sub(self.accrued_seconds);
        self.accrued_seconds = self.accrued_seconds.max(elapsed);
        if segment == 0 {
            return;
        }

        for team in Team::BOTH {
            let lineup = teams.get(team);
            let keeper = state.keeper_slot(team);
            if !lineup.is_on_field(keeper) {
                warn!(
                    "match {}: the {team} keeper {keeper} is on the bench",
                    state.match_number
                );
            }

            for slot in lineup.on_field() {
                let stats = self.roster.stats_mut(lineup.player(*slot));
                if *slot == keeper {
                    stats.keeper_seconds += segment;
                } else {
                    stats.field_seconds += segment;
                }
            }
        }
    }

    /// Swaps in the second half keepers and restarts the clock.
    ///
    /// # Errors
    ///
    /// If no keeper change is pending.
    pub fn complete_keeper_change(&mut self, now: i64) -> Result<&MatchState, ScheduleError> {
        let Some(match_number) = self.match_state.map(|state| state.match_number) else {
            return Err(ScheduleError::NoMatch);
        };

        let (yellow, blue) = self.scheduler.keeper_for_half(match_number, Half::Second)?;
        self.clock.confirm_keeper_change(now)?;
        self.accrue();

        let Some(state) = &mut self.match_state else {
            return Err(ScheduleError::NoMatch);
        };
        state.keeper_slot_yellow = yellow;
        state.keeper_slot_blue = blue;
        state.half = Half::Second;
        info!("match {match_number}: keeper change, both teams {yellow}");

        Ok(&*state)
    }

    /// Blows the final whistle, credits the remaining time and records the
    /// result.
    ///
    /// # Errors
    ///
    /// If no match is in progress.
    pub fn end_match(&mut self, now: i64) -> Result<GameHistoryEntry, ScheduleError> {
        if self.match_state.is_none() {
            return Err(ScheduleError::NoMatch);
        }

        let events = self.clock.tick(now);
        Self::log_events(&events);
        self.sync_match_state();
        self.accrue();
        self.clock.end();

        let entry = GameHistoryEntry::new(self.current_match, self.score);
        self.history.push(entry);
        info!(
            "match {} over after {}: {}",
            self.current_match,
            format_time(self.clock.elapsed_seconds()),
            entry
        );

        self.match_state = None;
        self.current_match += 1;

        Ok(entry)
    }

    /// # Errors
    ///
    /// If no match is in progress.
    pub fn adjust_score(&mut self, team: Team, delta: i32) -> Result<Score, ScheduleError> {
        if self.match_state.is_none() {
            return Err(ScheduleError::NoMatch);
        }

        self.score.adjust(team, delta);
        Ok(self.score)
    }

    /// The player in goal right now, if the scheduled keeper is on the field.
    #[must_use]
    pub fn keeper(&self, team: Team) -> Option<PlayerId> {
        let state = self.match_state.as_ref()?;
        let lineup = self.teams.as_ref()?.get(team);
        let slot = state.keeper_slot(team);

        lineup.is_on_field(slot).then(|| lineup.player(slot))
    }

    /// The swaps each team needs before the current match. A table of keeper
    /// pairs has no lineups to follow, so it always rotates by play time.
    ///
    /// # Errors
    ///
    /// If the teams are not built or the rotation table gives an unbalanced
    /// lineup.
    pub fn plan_substitutions(&self) -> Result<Vec<Substitution>, ScheduleError> {
        let Some(teams) = &self.teams else {
            return Err(ScheduleError::TeamsNotBuilt);
        };

        let strategy = if self.scheduler.table().has_lineups() {
            self.strategy
        } else {
            debug!(
                "the {} table has no lineups, substituting by play time",
                self.scheduler.table().name()
            );
            SubstitutionStrategy::PlayTime
        };

        match strategy {
            SubstitutionStrategy::RotationTable => {
                let next = self.scheduler.lineup_for_match(self.current_match)?;
                Team::BOTH
                    .iter()
                    .map(|team| teams.get(*team).plan_for(&next))
                    .collect()
            }
            SubstitutionStrategy::PlayTime => Ok(Team::BOTH
                .iter()
                .map(|team| suggest_by_play_time(teams.get(*team), &self.roster))
                .collect()),
        }
    }

    /// Plans and applies the swaps for both teams, or changes nothing.
    ///
    /// # Errors
    ///
    /// If a match is in progress or planning fails.
    pub fn apply_substitutions(&mut self) -> Result<Vec<Substitution>, ScheduleError> {
        self.no_match_in_progress("substitute")?;
        let substitutions = self.plan_substitutions()?;

        let Some(teams) = &self.teams else {
            return Err(ScheduleError::TeamsNotBuilt);
        };
        let mut updated = teams.clone();
        for substitution in &substitutions {
            updated.get_mut(substitution.team).apply(substitution)?;
        }

        for substitution in substitutions.iter().filter(|sub| !sub.is_empty()) {
            info!("substitution {substitution}");
        }
        self.teams = Some(updated);

        Ok(substitutions)
    }

    fn describe_lineup(&self, team: Team) -> String {
        let Some(teams) = &self.teams else {
            return format!("{team}: -");
        };

        let lineup = teams.get(team);
        let field = lineup
            .on_field()
            .iter()
            .map(|slot| format!("{slot} {}", self.roster.name(lineup.player(*slot))))
            .collect::<Vec<_>>()
            .join(", ");
        let bench = lineup
            .bench()
            .iter()
            .map(|slot| format!("{slot} {}", self.roster.name(lineup.player(*slot))))
            .collect::<Vec<_>>()
            .join(", ");

        format!("{team}: {field} | bench: {bench}")
    }

    /// # Errors
    ///
    /// If the command is illegal or invalid.
    pub fn read_line(&mut self, buffer: &str, now: i64) -> anyhow::Result<Option<String>> {
        let mut buffer = Cow::from(buffer);
        if let Some(comment_offset) = buffer.find('#') {
            buffer.to_mut().replace_range(comment_offset.., "");
        }

        self.update(Message::from_str(buffer.as_ref())?, now)
    }

    /// # Errors
    ///
    /// If the command is illegal or invalid.
    #[allow(clippy::too_many_lines)]
    pub fn update(&mut self, message: Message, now: i64) -> anyhow::Result<Option<String>> {
        match message {
            Message::AddPlayer(name, level, team) => {
                let id = self.add_player(&name, level, team)?;
                Ok(Some(id.to_string()))
            }
            Message::AdjustScore(team, delta) => {
                Ok(Some(self.adjust_score(team, delta)?.to_string()))
            }
            Message::ApplySubstitutions => {
                let substitutions = self.apply_substitutions()?;
                Ok(Some(join_lines(&substitutions)))
            }
            Message::BuildTeams(criterion) => {
                self.build_teams(criterion)?;
                Ok(Some(format!(
                    "\n{}\n{}",
                    self.describe_lineup(Team::Yellow),
                    self.describe_lineup(Team::Blue)
                )))
            }
            Message::Clock(settings) => {
                self.set_clock_settings(settings)?;
                Ok(Some(settings.to_string()))
            }
            Message::DeletePlayer(id) => Ok(Some(self.delete_player(id)?.to_string())),
            Message::DisbandTeams => {
                self.disband_teams()?;
                Ok(Some(String::new()))
            }
            Message::Empty => Ok(None),
            Message::EndMatch => Ok(Some(self.end_match(now)?.to_string())),
            Message::History => Ok(Some(format!("\n{}", self.history))),
            Message::KeeperChange => {
                let state = self.complete_keeper_change(now)?;
                Ok(Some(state.keeper_slot_yellow.to_string()))
            }
            Message::KeeperForHalf(match_number, half) => {
                let (yellow, blue) = self.scheduler.keeper_for_half(match_number, half)?;
                Ok(Some(format!("{} {}", yellow.get(), blue.get())))
            }
            Message::KnownCommand(command) => {
                if COMMANDS.contains(&command.as_str()) {
                    Ok(Some("true".to_string()))
                } else {
                    Ok(Some("false".to_string()))
                }
            }
            Message::LineupForMatch(match_number) => {
                let lineup = self.scheduler.lineup_for_match(match_number)?;
                let bench = self.scheduler.bench_for_match(match_number)?;
                Ok(Some(format!(
                    "{} | {}",
                    join_slots(lineup.iter()),
                    join_slots(bench.iter())
                )))
            }
            Message::ListCommands => {
                let mut commands = "\n".to_string();
                commands.push_str(&COMMANDS.join("\n"));
                Ok(Some(commands))
            }
            Message::Name => {
                let name = env!("CARGO_PKG_NAME");
                Ok(Some(name.to_string()))
            }
            Message::NextKeeper(match_number, half) => Ok(Some(
                self.scheduler
                    .next_keeper_slot(match_number, half)?
                    .get()
                    .to_string(),
            )),
            Message::Pause => {
                let events = self.pause(now)?;
                Ok(Some(join_lines(&events)))
            }
            Message::PlanSubstitutions => {
                let substitutions = self.plan_substitutions()?;
                Ok(Some(join_lines(&substitutions)))
            }
            Message::Players => Ok(Some(format!("\n{}", self.roster))),
            Message::ProtocolVersion => Ok(Some("1".to_string())),
            Message::Quit => exit(0),
            Message::ResetClock => {
                self.reset_clock(now)?;
                Ok(Some(String::new()))
            }
            Message::Resume => {
                self.resume(now)?;
                Ok(Some(String::new()))
            }
            Message::SampleRoster => {
                self.load_sample_roster()?;
                Ok(Some(self.roster.len().to_string()))
            }
            Message::Show => Ok(Some(format!("\n{self}"))),
            Message::Snapshot => Ok(Some(ron::ser::to_string(self)?)),
            Message::StartMatch => {
                let state = self.start_match(now)?;
                Ok(Some(state.match_number.to_string()))
            }
            Message::Stats => {
                let mut players: Vec<_> = self
                    .roster
                    .players()
                    .iter()
                    .map(|player| (player, self.roster.stats(player.id)))
                    .collect();
                players.sort_by_key(|(player, stats)| (stats.total_seconds(), player.id));

                let lines = players
                    .iter()
                    .map(|(player, stats)| format!("{} {} {stats}", player.id, player.name))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(Some(format!("\n{lines}")))
            }
            Message::Strategy(strategy) => {
                self.set_strategy(strategy);
                Ok(Some(String::new()))
            }
            Message::Table(preset) => {
                self.set_table(RotationTable::preset(preset))?;
                Ok(Some(format!("\n{}", self.scheduler.table())))
            }
            Message::Teams => Ok(Some(format!(
                "\n{}\n{}",
                self.describe_lineup(Team::Yellow),
                self.describe_lineup(Team::Blue)
            ))),
            Message::Tick => {
                let events = self.tick(now);
                Ok(Some(join_lines(&events)))
            }
            Message::Version => {
                let version = env!("CARGO_PKG_VERSION");
                Ok(Some(version.to_string()))
            }
        }
    }
}

fn join_lines<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_slots<'a>(slots: impl Iterator<Item = &'a Slot>) -> String {
    slots
        .map(|slot| slot.get().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "match: {}", self.current_match)?;
        if let Ok(row) = self.scheduler.schedule_match(self.current_match)
            && row != self.current_match as usize
        {
            writeln!(f, "schedule: match {row} repeats")?;
        }
        writeln!(f, "table: {}", self.scheduler.table().name())?;
        writeln!(f, "clock: {}", self.clock)?;
        writeln!(f, "score: {}", self.score)?;

        for team in Team::BOTH {
            let keeper = match (self.match_state, self.keeper(team)) {
                (Some(state), Some(id)) => {
                    format!("{} {}", state.keeper_slot(team), self.roster.name(id))
                }
                (Some(state), None) => format!("{} -", state.keeper_slot(team)),
                (None, _) => "-".to_string(),
            };
            writeln!(f, "{team} keeper: {keeper}")?;
        }

        writeln!(f, "{}", self.describe_lineup(Team::Yellow))?;
        writeln!(f, "{}", self.describe_lineup(Team::Blue))?;

        let (yellow, blue, draws) = self.history.record();
        write!(f, "record: yellow {yellow} blue {blue} draws {draws}")
    }
}
