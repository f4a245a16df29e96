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

use std::{
    io::{self, Write},
    process::Command,
};

use clap::{CommandFactory, Parser};
use log::info;

use futsal_rotation::{
    COPYRIGHT,
    clock::ClockSettings,
    rotation::{RotationTable, TablePreset},
    session::Session,
    substitution::SubstitutionStrategy,
    utils::{init_logger, now_millis},
};

/// Futsal Rotation
///
/// Runs a futsal session over a line based text protocol: build two squads of
/// nine, then play match after match with the keepers and lineups taken from
/// a rotation table.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The rotation table: keeper_pair or field_lineup
    #[arg(default_value_t = TablePreset::FieldLineup, long)]
    table: TablePreset,

    /// The match clock: debug, standard or KEEPER_SECONDS:MATCH_SECONDS
    #[arg(default_value = "standard", long)]
    clock: ClockSettings,

    /// How substitutions are chosen: rotation_table or play_time
    #[arg(default_value_t = SubstitutionStrategy::RotationTable, long)]
    strategy: SubstitutionStrategy,

    /// Start with the eighteen sample players
    #[arg(long)]
    sample_roster: bool,

    /// Displays the session after every command
    #[arg(long)]
    display_session: bool,

    /// Whether the application is being run by systemd
    #[arg(long)]
    systemd: bool,

    /// Build the manpage
    #[arg(long)]
    man: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.man {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Args::command()
            .name("futsal-text-protocol")
            .long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-19");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        std::fs::write("futsal-text-protocol.1", buffer)?;
        return Ok(());
    }

    init_logger(args.systemd);

    let mut session = Session::new(RotationTable::preset(args.table), args.clock, args.strategy);
    if args.sample_roster {
        session.load_sample_roster()?;
    }
    info!(
        "table {}, clock {}, strategy {}",
        args.table, args.clock, args.strategy
    );

    play(&mut session, args.display_session)
}

fn clear_screen() -> anyhow::Result<()> {
    #[cfg(target_family = "unix")]
    Command::new("clear").status()?;

    #[cfg(target_family = "windows")]
    Command::new("cls").status()?;

    Ok(())
}

fn play(session: &mut Session, display_session: bool) -> anyhow::Result<()> {
    let mut buffer = String::new();
    let stdin = io::stdin();

    if display_session {
        clear_screen()?;
        println!("{session}\n");
        println!("Enter 'list_commands' for a list of commands.");
    }

    loop {
        match stdin.read_line(&mut buffer) {
            Ok(0) => return Ok(()),
            Ok(_) => {}
            Err(error) => {
                println!("? {error}\n");
                return Ok(());
            }
        }

        // The clock only moves when a line comes in.
        for event in session.tick(now_millis()) {
            println!("# {event}");
        }

        let result = session.read_line(&buffer, now_millis());

        if display_session {
            clear_screen()?;
            println!("{session}\n");
        }

        match result {
            Err(error) => println!("? {error}\n"),
            Ok(message) => {
                if let Some(message) = message {
                    println!("= {message}");
                }
            }
        }

        buffer.clear();
    }
}
