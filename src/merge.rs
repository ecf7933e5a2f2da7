//! Merge a redraft pull into a dynasty player collection
//!
//! Players are matched on their normalized name. The first dynasty record
//! with a given name receives the redraft valuation; later records sharing
//! that name are left alone, and redraft records with no dynasty match are
//! dropped. Distinct players sharing one name collapse into one.

use crate::config::Board;
use crate::error::FetchError;
use crate::fetch::{fetch_rankings, PageSource, RankingRequest};
use crate::player::PlayerRecord;
use std::collections::HashMap;
use tracing::{debug, info};

/// Attach each redraft record's `board` valuation to the matching dynasty
/// record, returning the merged collection
pub fn merge_redraft(
    players: Vec<PlayerRecord>,
    redraft: &[PlayerRecord],
    board: Board,
) -> Vec<PlayerRecord> {
    let (updates, dropped) = {
        let mut first_by_name: HashMap<&str, usize> = HashMap::new();
        for (idx, player) in players.iter().enumerate() {
            first_by_name.entry(player.name.as_str()).or_insert(idx);
        }

        let mut updates = Vec::new();
        let mut dropped = 0usize;
        for record in redraft {
            let Some(valuation) = record.valuation(board) else {
                continue;
            };
            match first_by_name.get(record.name.as_str()) {
                Some(&idx) => updates.push((idx, valuation.clone())),
                None => {
                    debug!(name = %record.name, "no dynasty match for redraft player");
                    dropped += 1;
                }
            }
        }
        (updates, dropped)
    };

    let mut merged = players;
    let matched = updates.len();
    for (idx, valuation) in updates {
        merged[idx].valuations.insert(board, valuation);
    }

    info!(matched, dropped, "redraft merge complete");
    merged
}

/// Pull the redraft board described by `request` and merge it into
/// `players`
pub async fn merge_redraft_values<S: PageSource>(
    source: &S,
    players: Vec<PlayerRecord>,
    request: &RankingRequest,
) -> Result<Vec<PlayerRecord>, FetchError> {
    let redraft = fetch_rankings(source, request).await?;
    Ok(merge_redraft(players, &redraft, request.board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests::{page_of, StaticPages};
    use crate::player::Valuation;
    use std::collections::BTreeMap;

    fn player(name: &str, board: Board, value: i64) -> PlayerRecord {
        let mut valuations = BTreeMap::new();
        valuations.insert(
            board,
            Valuation {
                value,
                position_rank: Some("WR1".to_string()),
                ..Default::default()
            },
        );
        PlayerRecord {
            name: name.to_string(),
            position: "WR".to_string(),
            team: Some("CIN".to_string()),
            is_rookie: false,
            age: Some(25.0),
            valuations,
        }
    }

    #[test]
    fn test_merge_attaches_redraft_values() {
        let dynasty = vec![
            player("A", Board::Dynasty1Qb, 100),
            player("B", Board::Dynasty1Qb, 90),
        ];
        let redraft = vec![player("B", Board::Redraft1Qb, 40)];

        let merged = merge_redraft(dynasty, &redraft, Board::Redraft1Qb);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].value(Board::Redraft1Qb), 0);
        assert_eq!(merged[1].value(Board::Redraft1Qb), 40);
        assert_eq!(merged[1].value(Board::Dynasty1Qb), 90);
    }

    #[test]
    fn test_unmatched_redraft_dropped() {
        let dynasty = vec![player("A", Board::DynastySf, 100)];
        let redraft = vec![player("Z", Board::RedraftSf, 40)];

        let merged = merge_redraft(dynasty, &redraft, Board::RedraftSf);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].valuation(Board::RedraftSf).is_none());
    }

    #[test]
    fn test_duplicate_names_first_match_wins() {
        let dynasty = vec![
            player("Dup", Board::Dynasty1Qb, 100),
            player("Dup", Board::Dynasty1Qb, 50),
        ];
        let redraft = vec![player("Dup", Board::Redraft1Qb, 70)];

        let merged = merge_redraft(dynasty, &redraft, Board::Redraft1Qb);
        assert_eq!(merged[0].value(Board::Redraft1Qb), 70);
        assert!(merged[1].valuation(Board::Redraft1Qb).is_none());
    }

    #[test]
    fn test_later_redraft_duplicate_overwrites() {
        let dynasty = vec![player("Dup", Board::Dynasty1Qb, 100)];
        let redraft = vec![
            player("Dup", Board::Redraft1Qb, 70),
            player("Dup", Board::Redraft1Qb, 20),
        ];

        let merged = merge_redraft(dynasty, &redraft, Board::Redraft1Qb);
        assert_eq!(merged[0].value(Board::Redraft1Qb), 20);
    }

    #[tokio::test]
    async fn test_merge_redraft_values_fetches_board() {
        let req = RankingRequest::new(Board::RedraftSf, "http://ktc.test", 1);
        let mut source = StaticPages::default();
        source
            .pages
            .insert(req.page_url(0), page_of(&[("ACIN", "WR3", 55)]));

        let dynasty = vec![player("A", Board::DynastySf, 100)];
        let merged = merge_redraft_values(&source, dynasty, &req).await.unwrap();
        let v = merged[0].valuation(Board::RedraftSf).unwrap();
        assert_eq!(v.value, 55);
        assert_eq!(v.position_rank.as_deref(), Some("WR3"));
    }
}
