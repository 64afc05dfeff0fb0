use anyhow::Result;

use club_league::cli::Command;
use club_league::{
    handle_completions, handle_init, handle_process, handle_register, handle_season,
    handle_standings, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Process { lookback_hours } => handle_process(*lookback_hours),
        Command::Init { reset } => handle_init(*reset),
        Command::Season { set } => handle_season(*set),
        Command::Register {
            competitor_id,
            name,
            club,
        } => handle_register(competitor_id, name, club.as_deref()),
        Command::Standings {
            competitors,
            lifetime,
            season,
            limit,
        } => handle_standings(*competitors, *lifetime, *season, *limit),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
