//! Scripted fetcher for unit tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{Api, Endpoint, Fetcher};
use crate::error::{FetchError, FetchResult};

#[derive(Clone)]
struct Route {
    delay: Duration,
    outcome: FetchResult<Value>,
}

/// Answers by path; unknown paths get a 404
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: HashMap<String, Route>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: &str, body: Value) -> Self {
        self.respond_after(path, Duration::ZERO, body)
    }

    pub fn respond_after(mut self, path: &str, delay: Duration, body: Value) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                delay,
                outcome: Ok(body),
            },
        );
        self
    }

    pub fn fail(mut self, path: &str, err: FetchError) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                delay: Duration::ZERO,
                outcome: Err(err),
            },
        );
        self
    }

    pub fn call_count(&self, path: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|p| *p == path).count()
    }

    /// Wrap into an `Api`, keeping a handle for call assertions
    pub fn into_api(self) -> (Api, Arc<ScriptedFetcher>) {
        let fetcher = Arc::new(self);
        (Api::new(fetcher.clone()), fetcher)
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn get_json(&self, endpoint: &Endpoint) -> FetchResult<Value> {
        let path = endpoint.path();
        self.calls.lock().unwrap().push(path.clone());

        let route = self.routes.get(&path).cloned();
        match route {
            Some(route) => {
                if !route.delay.is_zero() {
                    tokio::time::sleep(route.delay).await;
                }
                route.outcome
            }
            None => Err(FetchError::http(404, path)),
        }
    }
}
