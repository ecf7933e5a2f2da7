//! Ranking fetcher: paginated pulls of one ranking board
//!
//! Pages are requested one at a time, in order. Any fetch failure aborts
//! the whole pull; there are no retries.

use crate::config::Board;
use crate::error::FetchError;
use crate::extract::extract_page;
use crate::player::PlayerRecord;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Anything that can return the raw markup of a page
pub trait PageSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// `PageSource` over plain HTTP
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::Url {
            url: url.to_string(),
            source,
        })?;

        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(parsed).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(transport)
    }
}

/// One board pull: where to look and how many pages to read
#[derive(Debug, Clone)]
pub struct RankingRequest {
    pub board: Board,
    /// Template with `{page}` and `{format}` placeholders
    pub url_template: String,
    pub max_pages: usize,
}

impl RankingRequest {
    pub fn new(board: Board, base_url: &str, max_pages: usize) -> Self {
        Self {
            board,
            url_template: board.url_template(base_url),
            max_pages,
        }
    }

    pub fn page_url(&self, page: usize) -> String {
        self.url_template
            .replace("{page}", &page.to_string())
            .replace("{format}", &self.board.format_code().to_string())
    }
}

/// Fetch pages `0..max_pages` and collect every extracted record, in page
/// order
pub async fn fetch_rankings<S: PageSource>(
    source: &S,
    request: &RankingRequest,
) -> Result<Vec<PlayerRecord>, FetchError> {
    eprintln!("{}", request.board.description());

    let mut players = Vec::new();
    for page in 0..request.max_pages {
        let url = request.page_url(page);
        debug!(%url, "fetching page");

        let html = source.fetch(&url).await?;
        let records = extract_page(&html, request.board);

        eprintln!("  -> page {}/{}: {} players", page + 1, request.max_pages, records.len());
        players.extend(records);
    }

    info!(board = ?request.board, players = players.len(), "ranking pull complete");
    Ok(players)
}
