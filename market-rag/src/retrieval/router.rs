//! Keyword router between the listing and market backends.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{DocumentStream, RetrievalError, Retriever};

/// Keywords that send a query to the listing backend.
pub const LISTING_KEYWORDS: &[&str] = &[
    "list", "listed", "company", "ticker", "symbol", "nyse", "nasdaq", "iex", "cboe",
];

/// Keywords that send a query to the market backend.
pub const MARKET_KEYWORDS: &[&str] = &[
    "market",
    "performance",
    "trend",
    "return",
    "gain",
    "loss",
    "index",
    "s&p",
];

/// Which backend serves a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteChoice {
    /// Exchange listings: companies, tickers, venues.
    Listing,
    /// Market performance: returns, trends, indices.
    Market,
}

impl RouteChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Market => "market",
        }
    }
}

/// First keyword found in `query` (listing keywords checked first) and the backend it selects.
pub fn matched_keyword(query: &str) -> Option<(RouteChoice, &'static str)> {
    let q = query.to_lowercase();
    LISTING_KEYWORDS
        .iter()
        .find(|k| q.contains(*k))
        .map(|k| (RouteChoice::Listing, *k))
        .or_else(|| {
            MARKET_KEYWORDS
                .iter()
                .find(|k| q.contains(*k))
                .map(|k| (RouteChoice::Market, *k))
        })
}

/// Picks a backend by case-insensitive substring match; listing wins, market is the default.
pub fn route_query(query: &str) -> RouteChoice {
    matched_keyword(query).map_or(RouteChoice::Market, |(choice, _)| choice)
}

/// Retriever that routes every query to the listing or market backend.
pub struct RouterRetriever {
    listing: Arc<dyn Retriever>,
    market: Arc<dyn Retriever>,
}

impl RouterRetriever {
    pub fn new(listing: Arc<dyn Retriever>, market: Arc<dyn Retriever>) -> Self {
        Self { listing, market }
    }

    /// Routing decision for `query`, logged.
    pub fn route(&self, query: &str) -> RouteChoice {
        let matched = matched_keyword(query);
        let choice = matched.map_or(RouteChoice::Market, |(choice, _)| choice);
        info!(
            choice = choice.as_str(),
            keyword = ?matched.map(|(_, k)| k),
            query = %query,
            "routing retrieval query"
        );
        choice
    }

    /// Fetches from the backend for an already-made decision.
    pub async fn fetch_routed(
        &self,
        query: &str,
        choice: RouteChoice,
    ) -> Result<DocumentStream, RetrievalError> {
        match choice {
            RouteChoice::Listing => self.listing.fetch(query).await,
            RouteChoice::Market => self.market.fetch(query).await,
        }
    }
}

#[async_trait]
impl Retriever for RouterRetriever {
    async fn fetch(&self, query: &str) -> Result<DocumentStream, RetrievalError> {
        let choice = self.route(query);
        self.fetch_routed(query, choice).await
    }
}
