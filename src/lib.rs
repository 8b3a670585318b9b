pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod report;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use log::info;

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::domain::MatchRequest;
use crate::rating::{MatchId, PlayerId};
use crate::services::{LadderService, ServerService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn open_ladder() -> Result<LadderService> {
    LadderService::open(AppConfig::new())
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new().with_port(port);
        let service = ServerService::new(config);
        service.run().await
    })
}

pub fn handle_init() -> Result<()> {
    let config = AppConfig::new();
    LadderService::open(config.clone())?;
    info!("Database ready at {}", config.store.database_path);
    Ok(())
}

pub fn handle_reset() -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.store)?;
    let conn = database::get_connection(&pool)?;
    database::setup::reset_database(&conn)
}

pub fn handle_players() -> Result<()> {
    let ladder = open_ladder()?;
    println!("{}", report::leaderboard(&ladder.list_players()?));
    Ok(())
}

pub fn handle_add_player(name: &str) -> Result<()> {
    let player = open_ladder()?.create_player(name)?;
    println!("Created player #{} {} ({})", player.id, player.name, player.rating);
    Ok(())
}

pub fn handle_rename(player_id: PlayerId, name: &str) -> Result<()> {
    open_ladder()?.rename_player(player_id, name)?;
    println!("Renamed player #{} to {}", player_id, name.trim());
    Ok(())
}

pub fn handle_remove_player(player_id: PlayerId) -> Result<()> {
    open_ladder()?.delete_player(player_id)?;
    println!("Removed player #{}", player_id);
    Ok(())
}

pub fn handle_record(player_ids: [PlayerId; 4], winning_team: &str) -> Result<()> {
    let ladder = open_ladder()?;
    let request = MatchRequest::parse(player_ids.map(Some), Some(winning_team))?;
    let outcome = ladder.record_match(&request)?;
    let names = report::player_names(&ladder.list_players()?);
    print!("{}", report::outcome(&outcome, &names));
    Ok(())
}

pub fn handle_matches() -> Result<()> {
    let ladder = open_ladder()?;
    let names = report::player_names(&ladder.list_players()?);
    println!("{}", report::match_list(&ladder.list_matches()?, &names));
    Ok(())
}

pub fn handle_show_match(match_id: MatchId) -> Result<()> {
    let ladder = open_ladder()?;
    let detail = ladder.get_match(match_id)?;
    let names = report::player_names(&ladder.list_players()?);
    print!("{}", report::match_detail(&detail, &names));
    Ok(())
}

pub fn handle_delete_match(match_id: MatchId) -> Result<()> {
    open_ladder()?.delete_match(match_id)?;
    println!("Deleted match #{}", match_id);
    Ok(())
}

pub fn handle_history(player_id: PlayerId) -> Result<()> {
    let history = open_ladder()?.rating_history(player_id)?;
    println!("{}", report::history(&history));
    Ok(())
}

pub fn handle_progress(player_id: PlayerId) -> Result<()> {
    let progress = open_ladder()?.player_progress(player_id)?;
    println!("{}", report::progress(&progress));
    Ok(())
}

pub fn handle_reconcile() -> Result<()> {
    let corrected = open_ladder()?.reconcile()?;
    if corrected.is_empty() {
        println!("All ratings agree with the rating history");
    } else {
        println!("Corrected players: {:?}", corrected);
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
