use anyhow::Result;

use doubles_ladder::cli::Command;
use doubles_ladder::*;

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
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
        Command::Serve { port } => handle_serve(*port),
        Command::Init => handle_init(),
        Command::Reset => handle_reset(),
        Command::Players => handle_players(),
        Command::AddPlayer { name } => handle_add_player(name),
        Command::Rename { player_id, name } => handle_rename(*player_id, name),
        Command::RemovePlayer { player_id } => handle_remove_player(*player_id),
        Command::Record {
            team_a_player1,
            team_a_player2,
            team_b_player1,
            team_b_player2,
            winning_team,
        } => handle_record(
            [*team_a_player1, *team_a_player2, *team_b_player1, *team_b_player2],
            winning_team,
        ),
        Command::Matches => handle_matches(),
        Command::ShowMatch { match_id } => handle_show_match(*match_id),
        Command::DeleteMatch { match_id } => handle_delete_match(*match_id),
        Command::History { player_id } => handle_history(*player_id),
        Command::Progress { player_id } => handle_progress(*player_id),
        Command::Reconcile => handle_reconcile(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
