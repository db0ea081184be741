//! In-memory transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::error::{Error, HttpError};

use super::transport::{ApiRequest, Transport, TransportFuture};

enum Route {
    Fixed(serde_json::Value),
    /// Each call pops one response; the last one repeats.
    Sequence(VecDeque<serde_json::Value>),
    Status(u16),
}

/// Routes requests by exact path and records every call.
#[derive(Default)]
pub(crate) struct MockTransport {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, path: &str, body: serde_json::Value) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Route::Fixed(body));
    }

    pub(crate) fn respond_sequence(&self, path: &str, bodies: Vec<serde_json::Value>) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Route::Sequence(bodies.into()));
    }

    pub(crate) fn fail(&self, path: &str, status: u16) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Route::Status(status));
    }

    pub(crate) fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn answer(&self, path: &str) -> Result<serde_json::Value, Error> {
        let mut routes = self.routes.lock().unwrap();
        let status = |status: u16, body: &str| -> Error {
            HttpError::Status {
                status,
                body: body.to_string(),
            }
            .into()
        };
        match routes.get_mut(path) {
            Some(Route::Fixed(body)) => Ok(body.clone()),
            Some(Route::Sequence(queue)) => match queue.len() {
                0 => Err(status(500, "empty sequence")),
                1 => Ok(queue[0].clone()),
                _ => Ok(queue.pop_front().unwrap_or_default()),
            },
            Some(Route::Status(code)) => Err(status(*code, "mock failure")),
            None => Err(status(404, &format!("no route for {}", path))),
        }
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
        let result = self.answer(&request.path);
        self.calls.lock().unwrap().push(request);
        Box::pin(async move { result })
    }
}
