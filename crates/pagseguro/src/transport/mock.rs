//! Mock Transport
//!
//! For tests and demos. Replays queued responses in order and records every
//! request it receives.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{GatewayRequest, RawResponse, Transport};
use crate::error::{PagSeguroError, Result};

enum Reply {
    Response(RawResponse),
    Fault(String),
}

/// In-memory transport with canned replies
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<GatewayRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    #[must_use]
    pub fn respond(self, response: RawResponse) -> Self {
        lock(&self.replies).push_back(Reply::Response(response));
        self
    }

    /// Queue a transport fault (connection refused and the like)
    #[must_use]
    pub fn fail(self, message: impl Into<String>) -> Self {
        lock(&self.replies).push_back(Reply::Fault(message.into()));
        self
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<GatewayRequest> {
        lock(&self.requests).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: GatewayRequest) -> Result<RawResponse> {
        lock(&self.requests).push(request);

        match lock(&self.replies).pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Fault(message)) => Err(PagSeguroError::Transport(message)),
            None => Err(PagSeguroError::Transport("no mock response queued".into())),
        }
    }
}
