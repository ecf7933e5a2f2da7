//! Player-card extraction from ranking pages

use crate::config::Board;
use crate::names::parse_name;
use crate::player::{PlayerRecord, Valuation, PICK_POSITION};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

const CARD: &str = ".onePlayer";
const NAME: &str = ".player-name";
const POSITION: &str = ".position";
const VALUE: &str = ".value";
const AGE: &str = ".position.hidden-xs";
const RANK: &str = ".rank-number";
const TREND: &str = ".trend";
const TREND_UP: &str = ".trend-up";
const TREND_DOWN: &str = ".trend-down";
const TIER: &str = ".player-info";

/// Compiled selectors for one page
struct CardSelectors {
    card: Selector,
    name: Selector,
    position: Selector,
    value: Selector,
    age: Selector,
    rank: Selector,
    trend: Selector,
    trend_up: Selector,
    trend_down: Selector,
    tier: Selector,
    digits: Regex,
}

impl CardSelectors {
    fn new() -> Self {
        let sel = |s: &str| Selector::parse(s).unwrap();
        Self {
            card: sel(CARD),
            name: sel(NAME),
            position: sel(POSITION),
            value: sel(VALUE),
            age: sel(AGE),
            rank: sel(RANK),
            trend: sel(TREND),
            trend_up: sel(TREND_UP),
            trend_down: sel(TREND_DOWN),
            tier: sel(TIER),
            digits: Regex::new(r"\d+").unwrap(),
        }
    }
}

/// Extract every well-formed player card on a page.
///
/// Cards missing a name, position or value are skipped without error.
/// Age is only read for dynasty boards.
pub fn extract_page(html: &str, board: Board) -> Vec<PlayerRecord> {
    let doc = Html::parse_document(html);
    let sel = CardSelectors::new();

    doc.select(&sel.card)
        .filter_map(|card| extract_card(card, &sel, board))
        .collect()
}

fn extract_card(card: ElementRef, sel: &CardSelectors, board: Board) -> Option<PlayerRecord> {
    let raw_name = first_text(card, &sel.name)?;
    let position_rank = first_text(card, &sel.position)?;
    let raw_value = first_text(card, &sel.value)?;

    let parsed = parse_name(&raw_name);
    let position: String = position_rank.chars().take(2).collect();
    let value = raw_value.parse::<i64>().unwrap_or(0);

    let age = if board.is_dynasty() {
        first_text(card, &sel.age).and_then(|t| parse_age(&t))
    } else {
        None
    };

    let rank = first_text(card, &sel.rank).and_then(|t| t.parse::<u32>().ok());
    let trend = card
        .select(&sel.trend)
        .next()
        .map(|el| parse_trend(el, sel))
        .unwrap_or_else(|| "0".to_string());
    let tier = card.select(&sel.tier).next().and_then(second_child_text);

    let is_pick = position == PICK_POSITION;
    let valuation = Valuation {
        value,
        position_rank: if is_pick { None } else { Some(position_rank) },
        rank,
        trend,
        tier,
    };

    let mut valuations = BTreeMap::new();
    valuations.insert(board, valuation);

    Some(PlayerRecord {
        name: parsed.name,
        position,
        team: if is_pick { None } else { parsed.team },
        is_rookie: parsed.is_rookie,
        age,
        valuations,
    })
}

/// Age cell reads like `24.5 yo`; only the first four characters count
fn parse_age(text: &str) -> Option<f64> {
    let head: String = text.chars().take(4).collect();
    head.trim().parse::<f64>().ok()
}

fn parse_trend(el: ElementRef, sel: &CardSelectors) -> String {
    let amount = |marker: ElementRef| -> Option<String> {
        let text = stripped_text(marker);
        sel.digits.find(&text).map(|m| m.as_str().to_string())
    };

    if let Some(up) = el.select(&sel.trend_up).next() {
        if let Some(n) = amount(up) {
            return format!("+{}", n);
        }
    } else if let Some(down) = el.select(&sel.trend_down).next() {
        if let Some(n) = amount(down) {
            return format!("-{}", n);
        }
    }
    "0".to_string()
}

fn second_child_text(el: ElementRef) -> Option<String> {
    el.children()
        .filter_map(ElementRef::wrap)
        .nth(1)
        .map(stripped_text)
        .filter(|s| !s.is_empty())
}

fn first_text(el: ElementRef, sel: &Selector) -> Option<String> {
    el.select(sel).next().map(stripped_text)
}

/// Descendant text nodes, each trimmed, empty pieces dropped, joined
/// without a separator
fn stripped_text(el: ElementRef) -> String {
    el.text().map(str::trim).filter(|s| !s.is_empty()).collect()
}
