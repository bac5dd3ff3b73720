#![deny(missing_docs)]

//! Access to basic historical currency exchange rate feeds.
//!
//! A [RateFetcher] is constructed with the base URL of a feed that publishes
//! one XML document per calendar day. With the base URL
//! `http://api.finance.example.com/api/`, the document for 25 June 2010 is
//! expected at `http://api.finance.example.com/api/2010/06/25.xml`. Each
//! document lists `fx` records holding a currency code and its decimal rate
//! against the feed's base currency.

mod feed;
mod http;

pub use feed::ExtractError;

use feed::RateFeed;
use http::FeedHttpRequest;

/// The possible errors that can occur when looking up a rate.
#[derive(Debug)]
pub enum CallFeedError {
    /// Error that occurs when requesting the feed document.
    Http {
        /// The URL the request was issued against.
        url: String,
        /// The error reported by the HTTP client.
        error: String,
    },
    /// Error that occurs when extracting rates from the response.
    Extract {
        /// The URL the document was fetched from.
        url: String,
        /// The error that occurred while extracting.
        error: ExtractError,
    },
}

impl core::fmt::Display for CallFeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallFeedError::Http { url, error } => {
                write!(f, "Failed to request {url}: {error}")
            }
            CallFeedError::Extract { url, error } => {
                write!(f, "Failed to extract rate from {url}: {error}")
            }
        }
    }
}

impl std::error::Error for CallFeedError {}

/// Retrieves per-day exchange rates relative to a feed's base currency.
///
/// The fetcher holds nothing but the immutable base URL, so one instance can
/// be shared across threads without locking. Every call opens, drains, and
/// closes its own connection; no response is cached between calls.
#[derive(Clone, Debug)]
pub struct RateFetcher {
    base_url: String,
}

impl RateFetcher {
    /// Creates a fetcher for the feed rooted at `base_url`. The URL is
    /// stored verbatim as the prefix of every request; no network activity
    /// happens here.
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Returns the exchange rate of `currency_code` against the feed's base
    /// currency on the given day.
    ///
    /// The first record in document order with a matching code wins. A code
    /// listed by no record resolves to 1.0, the implicit rate of the base
    /// currency itself.
    pub fn get_exchange_rate(
        &self,
        currency_code: &str,
        year: u32,
        month: u32,
        day: u32,
    ) -> Result<f64, CallFeedError> {
        let (feed, url) = self.fetch_feed(year, month, day)?;
        feed.rate_for(currency_code)
            .map_err(|error| CallFeedError::Extract { url, error })
    }

    /// Returns the exchange rate of `from_currency` against `to_currency` on
    /// the given day, computed as the ratio of their rates from a single
    /// fetched document.
    ///
    /// A `to_currency` that resolves to the 1.0 default is treated as the
    /// base currency; the division carries no further guard.
    pub fn get_exchange_rate_between(
        &self,
        from_currency: &str,
        to_currency: &str,
        year: u32,
        month: u32,
        day: u32,
    ) -> Result<f64, CallFeedError> {
        let (feed, url) = self.fetch_feed(year, month, day)?;
        let from_rate = feed.rate_for(from_currency).map_err(|error| {
            CallFeedError::Extract {
                url: url.clone(),
                error,
            }
        })?;
        let to_rate = feed
            .rate_for(to_currency)
            .map_err(|error| CallFeedError::Extract { url, error })?;
        Ok(from_rate / to_rate)
    }

    /// Fetches and parses the feed document for the given day, returning it
    /// together with the URL it was fetched from.
    fn fetch_feed(
        &self,
        year: u32,
        month: u32,
        day: u32,
    ) -> Result<(RateFeed, String), CallFeedError> {
        let url = self.build_url(year, month, day);
        log::debug!("requesting rate feed document at {}", url);
        let body = FeedHttpRequest::new().get(&url).send().map_err(|error| {
            CallFeedError::Http {
                url: url.clone(),
                error,
            }
        })?;
        let feed = RateFeed::parse(&body).map_err(|error| CallFeedError::Extract {
            url: url.clone(),
            error,
        })?;
        log::debug!("extracted {} fx records from {}", feed.record_count(), url);
        Ok((feed, url))
    }

    /// Builds the per-day resource URL. Single-digit months and days are
    /// zero-padded to two digits; wider values pass through unchanged, even
    /// when the resulting URL cannot resolve.
    fn build_url(&self, year: u32, month: u32, day: u32) -> String {
        format!("{}{}/{:02}/{:02}.xml", self.base_url, year, month, day)
    }
}
