//! Player display-name parsing
//!
//! Player cards render the name immediately followed by an uppercase
//! team/status suffix with no separator (`Ja'Marr ChaseCIN`, `Bo NixRDEN`).
//! The split is positional: checks run in a fixed order and the first
//! match wins. There is no lookup against a list of real team codes, so a
//! name that itself ends in 2-4 uppercase letters will misparse.
//! Only the trailing suffix is removed; an earlier copy of the same letters
//! inside the name is left alone.

use serde::Serialize;

/// Restricted free agent marker
pub const RFA_MARKER: &str = "RFA";
/// Free agent marker
pub const FA_MARKER: &str = "FA";
/// Leading letter on a rookie's team code
pub const ROOKIE_MARKER: char = 'R';

/// Which rule matched the trailing suffix
#[derive(Debug, Clone, PartialEq, Eq)]
enum Suffix {
    RestrictedFreeAgent,
    RookieTeam(String),
    FreeAgent,
    Team(String),
    None,
}

/// A display name split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedName {
    pub name: String,
    pub team: Option<String>,
    pub is_rookie: bool,
}

/// Split a raw card name into name, team code and rookie flag
pub fn parse_name(raw: &str) -> ParsedName {
    let chars: Vec<char> = raw.chars().collect();
    let suffix = classify_suffix(&chars);

    let suffix_text = match &suffix {
        Suffix::RestrictedFreeAgent => RFA_MARKER.to_string(),
        Suffix::FreeAgent => FA_MARKER.to_string(),
        Suffix::RookieTeam(s) | Suffix::Team(s) => s.clone(),
        Suffix::None => String::new(),
    };
    let name = raw
        .strip_suffix(suffix_text.as_str())
        .unwrap_or(raw)
        .trim()
        .to_string();

    // RFA is matched before the rookie check ever runs, so its leading
    // 'R' never counts as a rookie marker.
    let (team, is_rookie) = match suffix {
        Suffix::RestrictedFreeAgent => (Some(RFA_MARKER.to_string()), false),
        Suffix::FreeAgent => (Some(FA_MARKER.to_string()), false),
        Suffix::RookieTeam(s) | Suffix::Team(s) => match s.strip_prefix(ROOKIE_MARKER) {
            Some(code) => (Some(code.to_string()), true),
            None => (Some(s), false),
        },
        Suffix::None => (None, false),
    };

    ParsedName {
        name,
        team,
        is_rookie,
    }
}

fn classify_suffix(chars: &[char]) -> Suffix {
    let len = chars.len();
    let tail = |n: usize| -> String { chars[len.saturating_sub(n)..].iter().collect() };

    if len >= 3 && tail(3) == RFA_MARKER {
        return Suffix::RestrictedFreeAgent;
    }
    if len >= 4 && chars[len - 4] == ROOKIE_MARKER {
        return Suffix::RookieTeam(tail(4));
    }
    if len >= 2 && tail(2) == FA_MARKER {
        return Suffix::FreeAgent;
    }
    if len >= 3 && chars[len - 3..].iter().all(|c| c.is_uppercase()) {
        return Suffix::Team(tail(3));
    }
    Suffix::None
}
