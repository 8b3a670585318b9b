use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Player;
use crate::domain::AggregateSnapshot;
use crate::rating::{PlayerId, RatingValue};

const PLAYER_COLUMNS: &str = "id, name, rating, matches_played, wins, losses, created_at";

pub fn insert_player(
    conn: &Connection,
    name: &str,
    starting_rating: RatingValue,
    created_at: NaiveDateTime,
) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (name, rating, matches_played, wins, losses, created_at) VALUES (?1, ?2, 0, 0, 0, ?3) RETURNING {}",
        PLAYER_COLUMNS
    );

    conn.query_row(&sql, params![name, starting_rating, created_at], parse_player_row)
        .context("Failed to insert new player")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        rating: row.get(2)?,
        matches_played: row.get(3)?,
        wins: row.get(4)?,
        losses: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub fn find_by_id(conn: &Connection, id: PlayerId) -> Result<Option<Player>> {
    let sql = format!("SELECT {} FROM players WHERE id = ?1", PLAYER_COLUMNS);

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

/// Highest rating first; ties broken by registration order.
pub fn list_by_rating(conn: &Connection) -> Result<Vec<Player>> {
    let sql = format!(
        "SELECT {} FROM players ORDER BY rating DESC, id ASC",
        PLAYER_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_ids(conn: &Connection) -> Result<Vec<PlayerId>> {
    let mut stmt = conn.prepare("SELECT id FROM players ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Returns whether a row was updated.
pub fn update_name(conn: &Connection, id: PlayerId, name: &str) -> Result<bool> {
    let updated = conn
        .execute("UPDATE players SET name = ?1 WHERE id = ?2", params![name, id])
        .context("Failed to rename player")?;

    Ok(updated > 0)
}

pub fn update_snapshot(conn: &Connection, id: PlayerId, snapshot: &AggregateSnapshot) -> Result<()> {
    let sql = "UPDATE players SET rating = ?1, matches_played = ?2, wins = ?3, losses = ?4 WHERE id = ?5";

    let updated = conn
        .execute(
            sql,
            params![
                snapshot.rating,
                snapshot.matches_played,
                snapshot.wins,
                snapshot.losses,
                id
            ],
        )
        .with_context(|| format!("Failed to update rating snapshot for player {}", id))?;

    if updated == 0 {
        anyhow::bail!("Player {} vanished while updating its rating snapshot", id);
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: PlayerId) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM players WHERE id = ?1", params![id])
        .context("Failed to delete player")?;

    Ok(deleted > 0)
}
