//! Canned-reply transport for tests.

use std::{
    collections::VecDeque,
    sync::Mutex,
};

use super::{Transport, sealed};
use crate::error::Result;

/// Transport that replays queued reply bodies and records every request.
///
/// Useful for exercising the full process flow without a network. Replies are
/// consumed in FIFO order; when the queue is empty, an empty body is returned
/// (which decodes to a response with every field absent).
///
/// # Examples
///
/// ```
/// use paygate::transport::{MockTransport, Transport};
///
/// # async fn example() -> paygate::error::Result<()> {
/// let transport = MockTransport::replying("response=1&response_code=100");
/// let body = transport.post_form("https://gw.example.com", &[]).await?;
/// assert_eq!(body, "response=1&response_code=100");
/// assert_eq!(transport.requests().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl sealed::private::Sealed for MockTransport {}

impl MockTransport {
    /// Creates a mock with no queued replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock with a single queued reply body.
    #[must_use]
    pub fn replying(body: &str) -> Self {
        let mock = Self::new();
        mock.push_reply(body);
        mock
    }

    /// Queues another reply body.
    pub fn push_reply(&self, body: &str) {
        self.replies
            .lock()
            .expect("mock reply queue mutex should not be poisoned")
            .push_back(body.to_owned());
    }

    /// All requests recorded so far, as (endpoint, parameter set) pairs.
    #[must_use]
    pub fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.requests
            .lock()
            .expect("mock request log mutex should not be poisoned")
            .clone()
    }

    /// The most recent recorded request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<(String, Vec<(String, String)>)> {
        self.requests().pop()
    }
}

impl Transport for MockTransport {
    async fn post_form<'a>(
        &'a self,
        endpoint: &'a str,
        params: &'a [(String, String)],
    ) -> Result<String> {
        self.requests
            .lock()
            .expect("mock request log mutex should not be poisoned")
            .push((endpoint.to_owned(), params.to_vec()));

        let reply = self
            .replies
            .lock()
            .expect("mock reply queue mutex should not be poisoned")
            .pop_front()
            .unwrap_or_default();
        Ok(reply)
    }

    fn protocol_name(&self) -> &'static str {
        "mock"
    }
}
