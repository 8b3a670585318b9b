//! Plain-text rendering for the command line.

use std::collections::HashMap;
use std::fmt::Write as _;

use colored::{ColoredString, Colorize};

use crate::database::models::{LedgerEntry, Match, Player};
use crate::domain::{MatchDetail, MatchOutcome, ProgressPoint, RatingChange};
use crate::rating::{PlayerId, RatingValue};

pub type PlayerNames = HashMap<PlayerId, String>;

pub fn player_names(players: &[Player]) -> PlayerNames {
    players.iter().map(|p| (p.id, p.name.clone())).collect()
}

fn name_of(names: &PlayerNames, id: PlayerId) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| format!("#{}", id))
}

pub fn colored_delta(delta: RatingValue) -> ColoredString {
    let text = format!("{:+}", delta);
    if delta > 0 {
        text.green()
    } else if delta < 0 {
        text.red()
    } else {
        text.normal()
    }
}

pub fn leaderboard(players: &[Player]) -> String {
    if players.is_empty() {
        return "No players yet.".to_string();
    }

    let mut out = format!(
        "{:>4}  {:<5} {:<20} {:>6} {:>7} {:>7} {:>7}\n",
        "Rank", "Id", "Name", "Rating", "Matches", "W-L", "Win %"
    );
    for (index, player) in players.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<5} {:<20} {:>6} {:>7} {:>7} {:>6.1}%",
            index + 1,
            player.id,
            player.name,
            player.rating,
            player.matches_played,
            format!("{}-{}", player.wins, player.losses),
            player.win_rate()
        );
    }
    out
}

fn team_line(names: &PlayerNames, ids: [PlayerId; 2]) -> String {
    format!("{} & {}", name_of(names, ids[0]), name_of(names, ids[1]))
}

pub fn match_list(matches: &[Match], names: &PlayerNames) -> String {
    if matches.is_empty() {
        return "No matches recorded yet.".to_string();
    }

    let mut out = String::new();
    for game in matches {
        let _ = writeln!(
            out,
            "#{:<5} {}  A: {}  vs  B: {}  (winner {})",
            game.id,
            game.created_at.format("%Y-%m-%d %H:%M"),
            team_line(names, game.team_a),
            team_line(names, game.team_b),
            game.winning_team
        );
    }
    out
}

fn change_lines(out: &mut String, changes: &[RatingChange], names: &PlayerNames) {
    for change in changes {
        let _ = writeln!(
            out,
            "  {:<20} {:>5} -> {:>5}  {}",
            name_of(names, change.player_id),
            change.rating_before,
            change.rating_after,
            colored_delta(change.rating_change)
        );
    }
}

pub fn outcome(outcome: &MatchOutcome, names: &PlayerNames) -> String {
    let mut out = format!("Recorded match #{}\n", outcome.match_id);
    change_lines(&mut out, &outcome.changes, names);
    out
}

pub fn match_detail(detail: &MatchDetail, names: &PlayerNames) -> String {
    let game = &detail.game;
    let mut out = format!(
        "Match #{} on {}: A ({}) vs B ({}), team {} won\n",
        game.id,
        game.created_at.format("%Y-%m-%d %H:%M"),
        team_line(names, game.team_a),
        team_line(names, game.team_b),
        game.winning_team
    );
    change_lines(&mut out, &detail.changes, names);
    out
}

pub fn history(entries: &[LedgerEntry]) -> String {
    if entries.is_empty() {
        return "No rating history.".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{}  match #{:<5} {:>5} -> {:>5}  {}",
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.match_id,
            entry.rating_before,
            entry.rating_after,
            colored_delta(entry.rating_change)
        );
    }
    out
}

pub fn progress(points: &[ProgressPoint]) -> String {
    if points.is_empty() {
        return "No matches played.".to_string();
    }

    let mut out = String::new();
    for point in points {
        let _ = writeln!(
            out,
            "{}  rating {:>5}  {}-{}  {:.1}%",
            point.played_at.format("%Y-%m-%d"),
            point.rating,
            point.cumulative_wins,
            point.cumulative_losses,
            point.win_rate
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn player(id: PlayerId, name: &str, rating: i64, wins: i64, losses: i64) -> Player {
        Player {
            id,
            name: name.to_string(),
            rating,
            matches_played: wins + losses,
            wins,
            losses,
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_leaderboard_rows() {
        colored::control::set_override(false);
        let players = vec![player(2, "Grace", 1516, 3, 1), player(1, "Ada", 1484, 0, 0)];

        let text = leaderboard(&players);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Grace"));
        assert!(lines[1].contains("3-1"));
        assert!(lines[1].contains("75.0%"));
        assert!(lines[2].contains("0.0%"));
    }

    #[test]
    fn test_empty_listings() {
        assert_eq!(leaderboard(&[]), "No players yet.");
        assert_eq!(match_list(&[], &PlayerNames::new()), "No matches recorded yet.");
        assert_eq!(history(&[]), "No rating history.");
    }

    #[test]
    fn test_outcome_uses_names_and_signs() {
        colored::control::set_override(false);
        let names = player_names(&[player(1, "Ada", 1500, 0, 0)]);
        let result = MatchOutcome {
            match_id: 9,
            changes: [
                RatingChange::new(1, 1500, 16),
                RatingChange::new(2, 1500, 16),
                RatingChange::new(3, 1500, -16),
                RatingChange::new(4, 1500, -16),
            ],
        };

        let text = outcome(&result, &names);
        assert!(text.starts_with("Recorded match #9"));
        assert!(text.contains("Ada"));
        assert!(text.contains("#2"));
        assert!(text.contains("+16"));
        assert!(text.contains("-16"));
    }
}
