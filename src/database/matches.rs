use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Match;
use crate::rating::{MatchId, PlayerId, Team};

const MATCH_COLUMNS: &str = "id, team_a_player_1_id, team_a_player_2_id, team_b_player_1_id, team_b_player_2_id, winning_team, created_at";

pub fn insert_match(
    conn: &Connection,
    team_a: [PlayerId; 2],
    team_b: [PlayerId; 2],
    winning_team: Team,
    created_at: NaiveDateTime,
) -> Result<Match> {
    let sql = format!(
        "INSERT INTO matches (team_a_player_1_id, team_a_player_2_id, team_b_player_1_id, team_b_player_2_id, winning_team, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {}",
        MATCH_COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            team_a[0],
            team_a[1],
            team_b[0],
            team_b[1],
            winning_team,
            created_at
        ],
        parse_match_row,
    )
    .context("Failed to insert match")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        team_a: [row.get(1)?, row.get(2)?],
        team_b: [row.get(3)?, row.get(4)?],
        winning_team: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub fn find_by_id(conn: &Connection, id: MatchId) -> Result<Option<Match>> {
    let sql = format!("SELECT {} FROM matches WHERE id = ?1", MATCH_COLUMNS);

    conn.query_row(&sql, params![id], parse_match_row)
        .optional()
        .context("Failed to query match by id")
}

/// Most recent first.
pub fn list_all(conn: &Connection) -> Result<Vec<Match>> {
    let sql = format!(
        "SELECT {} FROM matches ORDER BY created_at DESC, id DESC",
        MATCH_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Ids of every match the player took part in, oldest first.
pub fn list_ids_for_player(conn: &Connection, player_id: PlayerId) -> Result<Vec<MatchId>> {
    let sql = "
        SELECT id FROM matches
        WHERE ?1 IN (team_a_player_1_id, team_a_player_2_id, team_b_player_1_id, team_b_player_2_id)
        ORDER BY created_at ASC, id ASC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![player_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| format!("Failed to list matches for player {}", player_id))?;

    Ok(rows)
}

pub fn delete(conn: &Connection, id: MatchId) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM matches WHERE id = ?1", params![id])
        .context("Failed to delete match")?;

    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::players::insert_player;
    use crate::database::setup::initialize_schema;
    use chrono::NaiveDate;

    fn timestamp(seconds: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, seconds)
            .unwrap()
    }

    fn setup(players: usize) -> (Connection, Vec<PlayerId>) {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        let ids = (0..players)
            .map(|i| {
                insert_player(&conn, &format!("P{}", i), 1500, timestamp(0))
                    .unwrap()
                    .id
            })
            .collect();
        (conn, ids)
    }

    #[test]
    fn test_insert_and_find() {
        let (conn, p) = setup(4);
        let created = insert_match(&conn, [p[0], p[1]], [p[2], p[3]], Team::B, timestamp(5)).unwrap();

        assert_eq!(created.participants(), [p[0], p[1], p[2], p[3]]);
        assert_eq!(created.winning_team, Team::B);
        assert_eq!(created.team_of(p[3]), Some(Team::B));
        assert_eq!(find_by_id(&conn, created.id).unwrap(), Some(created));
    }

    #[test]
    fn test_duplicate_participants_rejected_by_schema() {
        let (conn, p) = setup(3);
        let result = insert_match(&conn, [p[0], p[1]], [p[2], p[0]], Team::A, timestamp(5));
        assert!(result.is_err());
    }

    #[test]
    fn test_list_all_newest_first() {
        let (conn, p) = setup(4);
        let first = insert_match(&conn, [p[0], p[1]], [p[2], p[3]], Team::A, timestamp(1)).unwrap();
        let second = insert_match(&conn, [p[0], p[2]], [p[1], p[3]], Team::B, timestamp(2)).unwrap();
        // Same instant as `second`: the later id wins the tie.
        let third = insert_match(&conn, [p[3], p[2]], [p[1], p[0]], Team::A, timestamp(2)).unwrap();

        let ids: Vec<_> = list_all(&conn).unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[test]
    fn test_list_ids_for_player() {
        let (conn, p) = setup(5);
        let first = insert_match(&conn, [p[0], p[1]], [p[2], p[3]], Team::A, timestamp(1)).unwrap();
        insert_match(&conn, [p[1], p[2]], [p[3], p[4]], Team::A, timestamp(2)).unwrap();
        let third = insert_match(&conn, [p[4], p[3]], [p[2], p[0]], Team::B, timestamp(3)).unwrap();

        assert_eq!(list_ids_for_player(&conn, p[0]).unwrap(), vec![first.id, third.id]);
        assert_eq!(list_ids_for_player(&conn, p[3]).unwrap().len(), 3);

        assert!(delete(&conn, first.id).unwrap());
        assert!(!delete(&conn, first.id).unwrap());
        assert_eq!(list_ids_for_player(&conn, p[0]).unwrap(), vec![third.id]);
    }
}
