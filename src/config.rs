//! Run configuration: league format, TEP tier, ranking boards

use crate::error::ConfigError;
use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://keeptradecut.com";
pub const DEFAULT_OUTPUT: &str = "ktc.csv";
pub const DEFAULT_MAX_PAGES: usize = 10;

/// League quarterback rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
pub enum LeagueFormat {
    #[value(name = "1qb")]
    OneQb,
    #[value(name = "sf")]
    Superflex,
}

impl LeagueFormat {
    /// Board supplying values for this format
    pub fn board(self, redraft: bool) -> Board {
        match (self, redraft) {
            (LeagueFormat::OneQb, false) => Board::Dynasty1Qb,
            (LeagueFormat::Superflex, false) => Board::DynastySf,
            (LeagueFormat::OneQb, true) => Board::Redraft1Qb,
            (LeagueFormat::Superflex, true) => Board::RedraftSf,
        }
    }
}

/// Accepts the spellings people type at the league-format prompt
impl std::str::FromStr for LeagueFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1QB" | "1" => Ok(LeagueFormat::OneQb),
            "SF" | "SUPERFLEX" | "SUPER FLEX" | "S" => Ok(LeagueFormat::Superflex),
            _ => Err(ConfigError::InvalidFormat(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for LeagueFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueFormat::OneQb => write!(f, "1QB"),
            LeagueFormat::Superflex => write!(f, "SF"),
        }
    }
}

/// One ranking list on the source site. Each pull fills exactly one board's
/// valuation on a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Board {
    Dynasty1Qb,
    DynastySf,
    Redraft1Qb,
    RedraftSf,
}

impl Board {
    /// Numeric `format=` code threaded through the source URL
    pub fn format_code(self) -> u8 {
        match self {
            Board::Dynasty1Qb => 1,
            Board::DynastySf => 0,
            Board::Redraft1Qb => 1,
            Board::RedraftSf => 2,
        }
    }

    pub fn is_dynasty(self) -> bool {
        matches!(self, Board::Dynasty1Qb | Board::DynastySf)
    }

    /// Page URL template with `{page}` and `{format}` placeholders
    pub fn url_template(self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if self.is_dynasty() {
            format!("{base}/dynasty-rankings?page={{page}}&filters=QB|WR|RB|TE|RDP&format={{format}}")
        } else {
            format!("{base}/fantasy-rankings?page={{page}}&filters=QB|WR|RB|TE&format={{format}}")
        }
    }

    /// Progress line shown while the board is being pulled
    pub fn description(self) -> &'static str {
        match self {
            Board::Dynasty1Qb => "Linking to keeptradecut.com's 1QB rankings...",
            Board::DynastySf => "Linking to keeptradecut.com's Superflex rankings...",
            Board::Redraft1Qb => "Linking to keeptradecut.com's Redraft 1QB rankings...",
            Board::RedraftSf => "Linking to keeptradecut.com's Redraft Superflex rankings...",
        }
    }
}

/// Tight End Premium tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TepTier {
    #[default]
    None,
    Plus,
    PlusPlus,
    PlusPlusPlus,
}

/// Fixed boost parameters for a non-zero tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TepParams {
    /// Multiplier applied to the raw TE value
    pub t_mult: f64,
    /// Range of the depth-dependent boost
    pub r: f64,
    /// Shift constant
    pub s: f64,
}

impl TepTier {
    pub fn params(self) -> Option<TepParams> {
        let (t_mult, r) = match self {
            TepTier::None => return None,
            TepTier::Plus => (1.1, 250.0),
            TepTier::PlusPlus => (1.2, 350.0),
            TepTier::PlusPlusPlus => (1.3, 450.0),
        };
        Some(TepParams { t_mult, r, s: 0.2 })
    }

    pub fn level(self) -> u8 {
        match self {
            TepTier::None => 0,
            TepTier::Plus => 1,
            TepTier::PlusPlus => 2,
            TepTier::PlusPlusPlus => 3,
        }
    }
}

impl TryFrom<u8> for TepTier {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TepTier::None),
            1 => Ok(TepTier::Plus),
            2 => Ok(TepTier::PlusPlus),
            3 => Ok(TepTier::PlusPlusPlus),
            other => Err(ConfigError::InvalidTep(other)),
        }
    }
}

/// Everything a scrape run needs, passed explicitly into the pipeline
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub format: LeagueFormat,
    pub redraft: bool,
    pub tep: TepTier,
    pub upload: bool,
    pub bucket: Option<String>,
    pub output: PathBuf,
    pub max_pages: usize,
    pub base_url: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            format: LeagueFormat::OneQb,
            redraft: false,
            tep: TepTier::None,
            upload: false,
            bucket: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            max_pages: DEFAULT_MAX_PAGES,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Board whose values end up in the export
    pub fn value_board(&self) -> Board {
        self.format.board(self.redraft)
    }

    /// Redraft leagues never carry a premium
    pub fn effective_tep(&self) -> TepTier {
        if self.redraft {
            TepTier::None
        } else {
            self.tep
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tep_try_from() {
        assert_eq!(TepTier::try_from(0), Ok(TepTier::None));
        assert_eq!(TepTier::try_from(3), Ok(TepTier::PlusPlusPlus));
        assert_eq!(TepTier::try_from(4), Err(ConfigError::InvalidTep(4)));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("1qb".parse::<LeagueFormat>(), Ok(LeagueFormat::OneQb));
        assert_eq!(" Super Flex\n".parse::<LeagueFormat>(), Ok(LeagueFormat::Superflex));
        assert_eq!(
            "2QB".parse::<LeagueFormat>(),
            Err(ConfigError::InvalidFormat("2QB".into()))
        );
    }

    #[test]
    fn test_tep_params() {
        assert!(TepTier::None.params().is_none());
        let p = TepTier::PlusPlus.params().unwrap();
        assert_eq!(p.t_mult, 1.2);
        assert_eq!(p.r, 350.0);
        assert_eq!(p.s, 0.2);
    }

    #[test]
    fn test_format_codes() {
        assert_eq!(LeagueFormat::OneQb.board(false).format_code(), 1);
        assert_eq!(LeagueFormat::Superflex.board(false).format_code(), 0);
        assert_eq!(LeagueFormat::OneQb.board(true).format_code(), 1);
        assert_eq!(LeagueFormat::Superflex.board(true).format_code(), 2);
    }

    #[test]
    fn test_url_template() {
        let t = Board::DynastySf.url_template("https://keeptradecut.com/");
        assert_eq!(
            t,
            "https://keeptradecut.com/dynasty-rankings?page={page}&filters=QB|WR|RB|TE|RDP&format={format}"
        );
        let t = Board::Redraft1Qb.url_template("http://localhost:1234");
        assert!(t.starts_with("http://localhost:1234/fantasy-rankings?"));
        assert!(!t.contains("RDP"));
    }

    #[test]
    fn test_redraft_ignores_tep() {
        let config = ScrapeConfig {
            redraft: true,
            tep: TepTier::Plus,
            ..Default::default()
        };
        assert_eq!(config.effective_tep(), TepTier::None);
        assert_eq!(config.value_board(), Board::Redraft1Qb);
    }
}
