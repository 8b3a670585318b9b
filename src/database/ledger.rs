use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::{LedgerEntry, NewLedgerEntry};
use crate::rating::{MatchId, PlayerId};

const ENTRY_COLUMNS: &str = "id, player_id, match_id, rating_before, rating_after, rating_change, won, created_at";

pub fn insert_entry(conn: &Connection, entry: &NewLedgerEntry) -> Result<LedgerEntry> {
    let sql = format!(
        "INSERT INTO rating_history (player_id, match_id, rating_before, rating_after, rating_change, won, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING {}",
        ENTRY_COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            entry.player_id,
            entry.match_id,
            entry.rating_before,
            entry.rating_after,
            entry.rating_change(),
            entry.won,
            entry.created_at
        ],
        parse_entry_row,
    )
    .with_context(|| {
        format!(
            "Failed to insert rating history for player {} in match {}",
            entry.player_id, entry.match_id
        )
    })
}

fn parse_entry_row(row: &rusqlite::Row) -> rusqlite::Result<LedgerEntry> {
    Ok(LedgerEntry {
        id: row.get(0)?,
        player_id: row.get(1)?,
        match_id: row.get(2)?,
        rating_before: row.get(3)?,
        rating_after: row.get(4)?,
        rating_change: row.get(5)?,
        won: row.get(6)?,
        created_at: row.get(7)?,
    })
}

/// A player's ledger, most recent entry first.
pub fn list_by_player(conn: &Connection, player_id: PlayerId) -> Result<Vec<LedgerEntry>> {
    let sql = format!(
        "SELECT {} FROM rating_history WHERE player_id = ?1 ORDER BY created_at DESC, id DESC",
        ENTRY_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id], parse_entry_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| format!("Failed to load rating history for player {}", player_id))?;

    Ok(rows)
}

/// Entries of one match in insertion order, which is A1, A2, B1, B2.
pub fn list_by_match(conn: &Connection, match_id: MatchId) -> Result<Vec<LedgerEntry>> {
    let sql = format!(
        "SELECT {} FROM rating_history WHERE match_id = ?1 ORDER BY id ASC",
        ENTRY_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![match_id], parse_entry_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| format!("Failed to load rating history for match {}", match_id))?;

    Ok(rows)
}

pub fn delete_by_match(conn: &Connection, match_id: MatchId) -> Result<usize> {
    conn.execute(
        "DELETE FROM rating_history WHERE match_id = ?1",
        params![match_id],
    )
    .with_context(|| format!("Failed to delete rating history for match {}", match_id))
}

pub fn delete_by_player(conn: &Connection, player_id: PlayerId) -> Result<usize> {
    conn.execute(
        "DELETE FROM rating_history WHERE player_id = ?1",
        params![player_id],
    )
    .with_context(|| format!("Failed to delete rating history for player {}", player_id))
}
