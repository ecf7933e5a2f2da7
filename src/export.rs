//! Export projection: player collection to final table
//!
//! Each `{format} x {redraft}` combination has its own header and value
//! column. Players whose selected value is not positive are left out.
//! Final order is value descending, ties broken by ascending rank with
//! unranked rows last.

use crate::config::{Board, LeagueFormat, TepTier};
use crate::error::TableError;
use crate::player::PlayerRecord;
use crate::table::{cmp_numeric_desc, Cell, Table};
use crate::tep::tep_adjust;
use chrono::{DateTime, Local};
use std::cmp::Ordering;
use tracing::info;

pub const RANK_COLUMN: &str = "Rank";

/// Column set for one export flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    pub board: Board,
    pub position_rank_header: &'static str,
    pub value_header: &'static str,
}

impl Projection {
    pub fn for_league(format: LeagueFormat, redraft: bool) -> Self {
        let board = format.board(redraft);
        let (position_rank_header, value_header) = match board {
            Board::Dynasty1Qb => ("Position Rank", "Value"),
            Board::DynastySf => ("SFPosition Rank", "SFValue"),
            Board::Redraft1Qb => ("Position Rank", "RdrftValue"),
            Board::RedraftSf => ("SFPosition Rank", "SFRdrftValue"),
        };
        Self {
            board,
            position_rank_header,
            value_header,
        }
    }

    /// Dynasty exports carry age and rookie columns
    fn with_dynasty_columns(&self) -> bool {
        self.board.is_dynasty()
    }

    pub fn header(&self, timestamp: &str) -> Vec<String> {
        let mut header = vec![
            timestamp.to_string(),
            self.position_rank_header.to_string(),
            "Position".to_string(),
            "Team".to_string(),
            self.value_header.to_string(),
        ];
        if self.with_dynasty_columns() {
            header.push("Age".to_string());
            header.push("Rookie".to_string());
        }
        header.extend([RANK_COLUMN, "Trend", "Tier"].map(String::from));
        header
    }

    /// Row for a player, or `None` when the player has no positive value on
    /// this projection's board
    pub fn row(&self, player: &PlayerRecord) -> Option<Vec<Cell>> {
        let valuation = player.valuation(self.board)?;
        if valuation.value <= 0 {
            return None;
        }

        let mut row = vec![
            Cell::text(player.name.as_str()),
            Cell::opt_text(valuation.position_rank.as_deref()),
            Cell::text(player.position.as_str()),
            Cell::opt_text(player.team.as_deref()),
            Cell::Int(valuation.value),
        ];
        if self.with_dynasty_columns() {
            row.push(player.age.map(Cell::Float).unwrap_or(Cell::Empty));
            row.push(Cell::text(if player.is_rookie { "Yes" } else { "No" }));
        }
        row.push(
            valuation
                .rank
                .map(|r| Cell::Int(i64::from(r)))
                .unwrap_or(Cell::Empty),
        );
        row.push(Cell::text(valuation.trend.as_str()));
        row.push(Cell::opt_text(valuation.tier.as_deref()));
        Some(row)
    }
}

/// Header cell 0, e.g. `Updated 10/15/26 at 03:04pm`
pub fn generation_stamp(now: &DateTime<Local>) -> String {
    format!(
        "Updated {} at {}",
        now.format("%m/%d/%y"),
        now.format("%I:%M%P")
    )
}

/// Project `players` into the export table, apply TEP for dynasty leagues
/// and put rows in final order
pub fn build_export(
    players: &[PlayerRecord],
    format: LeagueFormat,
    tep: TepTier,
    redraft: bool,
    now: &DateTime<Local>,
) -> Result<Table, TableError> {
    let projection = Projection::for_league(format, redraft);
    let mut table = Table::new(projection.header(&generation_stamp(now)));

    for row in players.iter().filter_map(|p| projection.row(p)) {
        table.push_row(row)?;
    }
    info!(
        rows = table.len(),
        skipped = players.len() - table.len(),
        "export table projected"
    );

    if !redraft && tep != TepTier::None {
        table = tep_adjust(table, tep, &[projection.value_header])?;
    }

    rank_rows(&mut table, projection.value_header)?;
    Ok(table)
}

/// Value descending; equal values by ascending rank, unranked last
pub fn rank_rows(table: &mut Table, value_header: &str) -> Result<(), TableError> {
    let value_col = table.column(value_header)?;
    let rank_col = table.column(RANK_COLUMN)?;

    table.rows_mut().sort_by(|a, b| {
        cmp_numeric_desc(a[value_col].as_f64(), b[value_col].as_f64()).then_with(|| {
            match (a[rank_col].as_f64(), b[rank_col].as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Valuation;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 15, 15, 4, 0).unwrap()
    }

    fn player(name: &str, pos: &str, vals: &[(Board, i64, Option<u32>)]) -> PlayerRecord {
        let valuations: BTreeMap<Board, Valuation> = vals
            .iter()
            .map(|(board, value, rank)| {
                (
                    *board,
                    Valuation {
                        value: *value,
                        position_rank: Some(format!("{}1", pos)),
                        rank: *rank,
                        ..Default::default()
                    },
                )
            })
            .collect();
        PlayerRecord {
            name: name.to_string(),
            position: pos.to_string(),
            team: Some("KC".to_string()),
            is_rookie: false,
            age: Some(27.5),
            valuations,
        }
    }

    fn names(t: &Table) -> Vec<String> {
        t.rows().iter().map(|r| r[0].to_string()).collect()
    }

    #[test]
    fn test_generation_stamp() {
        assert_eq!(generation_stamp(&now()), "Updated 10/15/26 at 03:04pm");
    }

    #[test]
    fn test_headers_per_projection() {
        let ts = "Updated";
        assert_eq!(
            Projection::for_league(LeagueFormat::OneQb, false).header(ts),
            ["Updated", "Position Rank", "Position", "Team", "Value", "Age", "Rookie", "Rank", "Trend", "Tier"]
        );
        assert_eq!(
            Projection::for_league(LeagueFormat::Superflex, true).header(ts),
            ["Updated", "SFPosition Rank", "Position", "Team", "SFRdrftValue", "Rank", "Trend", "Tier"]
        );
        assert_eq!(
            Projection::for_league(LeagueFormat::Superflex, false).value_header,
            "SFValue"
        );
        assert_eq!(
            Projection::for_league(LeagueFormat::OneQb, true).value_header,
            "RdrftValue"
        );
    }

    #[test]
    fn test_non_positive_values_excluded() {
        let players = vec![
            player("kept", "WR", &[(Board::Dynasty1Qb, 10, Some(1))]),
            player("zero", "WR", &[(Board::Dynasty1Qb, 0, Some(2))]),
            player("negative", "WR", &[(Board::Dynasty1Qb, -5, Some(3))]),
            player("other board", "WR", &[(Board::DynastySf, 50, Some(4))]),
        ];
        let t = build_export(&players, LeagueFormat::OneQb, TepTier::None, false, &now()).unwrap();
        assert_eq!(names(&t), ["kept"]);
    }

    #[test]
    fn test_tie_break_by_rank() {
        let players = vec![
            player("unranked", "WR", &[(Board::DynastySf, 500, None)]),
            player("twelve", "WR", &[(Board::DynastySf, 500, Some(12))]),
            player("top", "QB", &[(Board::DynastySf, 900, Some(1))]),
            player("five", "RB", &[(Board::DynastySf, 500, Some(5))]),
        ];
        let t = build_export(&players, LeagueFormat::Superflex, TepTier::None, false, &now()).unwrap();
        assert_eq!(names(&t), ["top", "five", "twelve", "unranked"]);
    }

    #[test]
    fn test_redraft_projection_uses_redraft_board() {
        let players = vec![
            player("both", "WR", &[(Board::Dynasty1Qb, 900, Some(1)), (Board::Redraft1Qb, 300, Some(7))]),
            player("dynasty only", "WR", &[(Board::Dynasty1Qb, 800, Some(2))]),
        ];
        let t = build_export(&players, LeagueFormat::OneQb, TepTier::Plus, true, &now()).unwrap();
        assert_eq!(names(&t), ["both"]);
        let value_col = t.column("RdrftValue").unwrap();
        assert_eq!(t.rows()[0][value_col], Cell::Int(300));
        assert!(t.column("Age").is_err());
    }

    #[test]
    fn test_two_tight_ends_tie_at_ceiling() {
        // Both TEs cap at 999; rank decides the order.
        let players = vec![
            player("second", "TE", &[(Board::Dynasty1Qb, 900, Some(2))]),
            player("first", "TE", &[(Board::Dynasty1Qb, 1000, Some(1))]),
        ];
        let t = build_export(&players, LeagueFormat::OneQb, TepTier::Plus, false, &now()).unwrap();
        assert_eq!(names(&t), ["first", "second"]);
        let value_col = t.column("Value").unwrap();
        assert!(t.rows().iter().all(|r| r[value_col] == Cell::Int(999)));
    }

    #[test]
    fn test_row_cells() {
        let mut p = player("Bo Nix", "QB", &[(Board::Dynasty1Qb, 5000, Some(40))]);
        p.is_rookie = true;
        let row = Projection::for_league(LeagueFormat::OneQb, false).row(&p).unwrap();
        let text: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        assert_eq!(text, ["Bo Nix", "QB1", "QB", "KC", "5000", "27.5", "Yes", "40", "0", ""]);
    }

    #[test]
    fn test_whole_age_keeps_fraction() {
        let mut p = player("A", "QB", &[(Board::Dynasty1Qb, 5000, Some(3))]);
        p.age = Some(22.0);
        let row = Projection::for_league(LeagueFormat::OneQb, false).row(&p).unwrap();
        assert_eq!(row[5].to_string(), "22.0");
    }
}
