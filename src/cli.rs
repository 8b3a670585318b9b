use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "2v2 ladder rating backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create the database schema if it does not exist
    Init,
    /// Drop all data and recreate the schema
    Reset,
    /// Show the leaderboard
    Players,
    /// Register a new player
    AddPlayer {
        name: String,
    },
    /// Change a player's display name
    Rename {
        player_id: i64,
        name: String,
    },
    /// Remove a player together with every match they played
    RemovePlayer {
        player_id: i64,
    },
    /// Record a 2v2 result
    Record {
        team_a_player1: i64,
        team_a_player2: i64,
        team_b_player1: i64,
        team_b_player2: i64,
        /// Winning team, A or B
        winning_team: String,
    },
    /// List matches, newest first
    Matches,
    /// Show one match with its rating changes
    ShowMatch {
        match_id: i64,
    },
    /// Delete a match and recompute its players' ratings
    DeleteMatch {
        match_id: i64,
    },
    /// Show a player's rating history, newest first
    History {
        player_id: i64,
    },
    /// Show a player's cumulative record over time
    Progress {
        player_id: i64,
    },
    /// Rebuild every player's rating from the rating history
    Reconcile,
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}
