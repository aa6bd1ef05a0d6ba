//! Test utilities: mock implementations of the backend traits.
//!
//! Handwritten mocks for dependency injection in unit tests. All mocks
//! use `Arc<Mutex<_>>` for interior mutability so tests can assert on
//! recorded calls (renders, shutdowns, fetches).

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::error::ScrapeError;
use crate::traits::{Fetcher, ProfileApi, Renderer, RendererFactory};

// ---------------------------------------------------------------------------
// MockRendererFactory / MockRenderer
// ---------------------------------------------------------------------------

/// Mock renderer factory with a queue of render results.
///
/// Every created renderer pops from the shared queue; shutdowns are
/// counted so tests can assert the browser is released on every path.
#[derive(Clone)]
pub struct MockRendererFactory {
    unavailable: Arc<Mutex<Option<String>>>,
    renders: Arc<Mutex<Vec<Result<String, ScrapeError>>>>,
    pub created: Arc<Mutex<usize>>,
    pub shutdowns: Arc<Mutex<usize>>,
}

impl MockRendererFactory {
    /// Factory whose renderer returns the given markup once.
    pub fn with_markup(html: &str) -> Self {
        Self::with_renders(vec![Ok(html.to_string())])
    }

    /// Factory whose renderer fails the first render with the given error.
    pub fn with_render_error(error: ScrapeError) -> Self {
        Self::with_renders(vec![Err(error)])
    }

    pub fn with_renders(renders: Vec<Result<String, ScrapeError>>) -> Self {
        Self {
            unavailable: Arc::new(Mutex::new(None)),
            renders: Arc::new(Mutex::new(renders)),
            created: Arc::new(Mutex::new(0)),
            shutdowns: Arc::new(Mutex::new(0)),
        }
    }

    /// Factory that always fails to provision a browser.
    pub fn unavailable() -> Self {
        Self {
            unavailable: Arc::new(Mutex::new(Some("no browser binary".to_string()))),
            renders: Arc::new(Mutex::new(Vec::new())),
            created: Arc::new(Mutex::new(0)),
            shutdowns: Arc::new(Mutex::new(0)),
        }
    }

    pub fn created_count(&self) -> usize {
        *self.created.lock().unwrap()
    }

    pub fn shutdown_count(&self) -> usize {
        *self.shutdowns.lock().unwrap()
    }
}

pub struct MockRenderer {
    renders: Arc<Mutex<Vec<Result<String, ScrapeError>>>>,
    shutdowns: Arc<Mutex<usize>>,
}

impl Renderer for MockRenderer {
    async fn render(&self, _url: &str) -> Result<String, ScrapeError> {
        let mut renders = self.renders.lock().unwrap();
        if renders.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            renders.remove(0)
        }
    }

    async fn shutdown(self) {
        *self.shutdowns.lock().unwrap() += 1;
    }
}

impl RendererFactory for MockRendererFactory {
    type Renderer = MockRenderer;

    async fn create(&self) -> Result<MockRenderer, ScrapeError> {
        if let Some(message) = self.unavailable.lock().unwrap().clone() {
            return Err(ScrapeError::BackendUnavailable(message));
        }
        *self.created.lock().unwrap() += 1;
        Ok(MockRenderer {
            renders: Arc::clone(&self.renders),
            shutdowns: Arc::clone(&self.shutdowns),
        })
    }
}

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher with a queue of responses. Each call pops the first
/// element; an empty queue returns a default HTML string.
#[derive(Clone)]
pub struct MockFetcher {
    responses: Arc<Mutex<Vec<Result<String, ScrapeError>>>>,
    pub calls: Arc<Mutex<usize>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self::with_responses(vec![Ok(html.to_string())])
    }

    pub fn with_error(error: ScrapeError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<String, ScrapeError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, ScrapeError> {
        *self.calls.lock().unwrap() += 1;
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockProfileApi
// ---------------------------------------------------------------------------

/// Mock data-API client. The default response is a null matchedUser.
#[derive(Clone)]
pub struct MockProfileApi {
    responses: Arc<Mutex<Vec<Result<Value, ScrapeError>>>>,
    pub calls: Arc<Mutex<usize>>,
}

impl MockProfileApi {
    pub fn new(response: Value) -> Self {
        Self::with_responses(vec![Ok(response)])
    }

    pub fn with_error(error: ScrapeError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<Value, ScrapeError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// The "no such user" answer the real API gives.
    pub fn user_not_found() -> Self {
        Self::new(json!({"data": {"matchedUser": null}}))
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl ProfileApi for MockProfileApi {
    async fn query(&self, _username: &str) -> Result<Value, ScrapeError> {
        *self.calls.lock().unwrap() += 1;
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(json!({"data": {"matchedUser": null}}))
        } else {
            responses.remove(0)
        }
    }
}
