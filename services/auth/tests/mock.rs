use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use gworkspace_core::{Context, Error, HttpSend, Result};

/// A scripted reply of the mock token endpoint.
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, String),
    Fail,
}

#[derive(Debug, Default)]
struct Inner {
    calls: AtomicUsize,
    requests: Mutex<Vec<http::Request<Bytes>>>,
    replies: Mutex<VecDeque<Reply>>,
    delay: Option<Duration>,
}

/// MockTokenEndpoint counts token exchanges and answers them.
///
/// Scripted replies are consumed first. Once they are exhausted every call gets a fresh
/// `ya29.token-{n}` valid for an hour.
#[derive(Debug, Clone, Default)]
pub struct MockTokenEndpoint {
    inner: Arc<Inner>,
}

impl MockTokenEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                delay: Some(delay),
                ..Default::default()
            }),
        }
    }

    pub fn push(&self, reply: Reply) -> &Self {
        self.inner.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Form parameters of the `n`th request.
    pub fn form(&self, n: usize) -> HashMap<String, String> {
        let requests = self.inner.requests.lock().unwrap();
        form_urlencoded::parse(requests[n].body())
            .into_owned()
            .collect()
    }

    pub fn uri(&self, n: usize) -> String {
        self.inner.requests.lock().unwrap()[n].uri().to_string()
    }

    pub fn context(&self) -> Context {
        let _ = env_logger::builder().is_test(true).try_init();
        Context::new().with_http_send(self.clone())
    }
}

#[async_trait::async_trait]
impl HttpSend for MockTokenEndpoint {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let n = self.inner.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(req.method(), http::Method::POST);
        assert_eq!(
            req.headers()[http::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        self.inner.requests.lock().unwrap().push(req);

        if let Some(delay) = self.inner.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.inner.replies.lock().unwrap().pop_front();
        let (status, body) = match reply {
            Some(Reply::Status(status, body)) => (status, body),
            Some(Reply::Fail) => return Err(Error::unexpected("connection reset by peer")),
            None => (
                200,
                format!(r#"{{"access_token":"ya29.token-{n}","expires_in":3599,"token_type":"Bearer"}}"#),
            ),
        };

        Ok(http::Response::builder()
            .status(status)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Bytes::from(body))
            .unwrap())
    }
}
