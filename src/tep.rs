//! Tight End Premium value adjustment
//!
//! For tier > 0 every TE row gets
//! `min(top - 1, round(t_mult * value + rank / (rows + 1 - 25) * r + s * r, 2))`
//! where `rank` is the row's 0-based position over all rows after a
//! descending sort, and `top` is the first row's value before any change.
//! The `+ 1` counts the header row.

use crate::config::TepTier;
use crate::error::TableError;
use crate::table::{Cell, Table};
use tracing::{debug, warn};

pub const POSITION_COLUMN: &str = "Position";
pub const TIGHT_END: &str = "TE";

/// Rows subtracted from the table size in the boost denominator
const DEPTH_OFFSET: f64 = 25.0;

/// Apply the premium for `tier` to each column in `value_cols`.
///
/// Rows are sorted descending by the first value column before and after
/// adjustment. Tier `None` only sorts.
pub fn tep_adjust(mut table: Table, tier: TepTier, value_cols: &[&str]) -> Result<Table, TableError> {
    let sort_col = match value_cols.first() {
        Some(name) => table.column(name).ok(),
        None => None,
    };
    if let Some(col) = sort_col {
        table.sort_desc_by(col);
    }

    let Some(params) = tier.params() else {
        return Ok(table);
    };
    if table.is_empty() {
        return Ok(table);
    }

    let pos_col = table.column(POSITION_COLUMN)?;
    let rows = table.len();
    let denominator = (rows + 1) as f64 - DEPTH_OFFSET;
    let mut warned = false;

    for name in value_cols {
        let Ok(idx) = table.column(name) else {
            continue;
        };
        let top = table.rows()[0][idx].clone();
        let Some(top_value) = top.as_f64() else {
            continue;
        };
        let ceiling = match top {
            Cell::Int(v) => Cell::Int(v - 1),
            _ => Cell::Float(top_value - 1.0),
        };

        let mut adjusted = 0usize;
        for (rank, row) in table.rows_mut().iter_mut().enumerate() {
            if !matches!(&row[pos_col], Cell::Text(p) if p == TIGHT_END) {
                continue;
            }
            let Some(value) = row[idx].as_f64() else {
                continue;
            };

            // Only a TE row divides, so tables without one never fail here
            if denominator == 0.0 {
                return Err(TableError::TepDenominatorZero { rows });
            }
            if denominator < 0.0 && !warned {
                warn!(
                    rows,
                    denominator, "TEP boost denominator is negative; depth boost shrinks with rank"
                );
                warned = true;
            }

            let boosted = params.t_mult * value;
            let depth = rank as f64 / denominator * params.r + params.s * params.r;
            let candidate = round2(boosted + depth);

            row[idx] = if candidate < top_value - 1.0 {
                Cell::Float(candidate)
            } else {
                ceiling.clone()
            };
            adjusted += 1;
        }
        debug!(column = %name, adjusted, tier = tier.level(), "TEP adjustment applied");
    }

    if let Some(col) = sort_col {
        table.sort_desc_by(col);
    }
    Ok(table)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
