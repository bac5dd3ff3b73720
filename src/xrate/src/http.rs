/// The `User-Agent` header attached to every feed request.
const USER_AGENT: &str = "Exchange Rate Fetcher";

/// Used to build a blocking `GET` request for a feed document.
pub(crate) struct FeedHttpRequest {
    url: String,
}

impl Default for FeedHttpRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedHttpRequest {
    /// Creates a new request to be built up before sending.
    pub(crate) fn new() -> Self {
        Self { url: String::new() }
    }

    /// A simple wrapper to assign the URL for the request.
    pub(crate) fn get(mut self, url: &str) -> Self {
        self.url = String::from(url);
        self
    }

    /// Issues the request and reads the response body to completion. The
    /// connection is closed before this method returns. A non-success status
    /// is an error. No explicit timeout is configured; the client's default
    /// behavior applies, so a stalled server stalls the call.
    pub(crate) fn send(self) -> Result<Vec<u8>, String> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| error.to_string())?;
        let response = client
            .get(&self.url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|error| error.to_string())?;
        let body = response.bytes().map_err(|error| error.to_string())?;
        Ok(body.to_vec())
    }
}
