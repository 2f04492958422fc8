//! Requests from the UI to the host editor.
//!
//! The RPC transport owns the receiving end of a [`HostHandle`] channel and
//! answers each [`HostRequest`] through its oneshot.

use crate::buffer_list::HostBuffer;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::future::Future;
use tokio::sync::{mpsc, oneshot};

/// Host round-trips the UI needs. Each is a single attempt.
pub trait Host {
    fn current_dir(&self) -> impl Future<Output = Result<String>> + Send;

    fn list_buffers(&self) -> impl Future<Output = Result<Vec<HostBuffer>>> + Send;

    /// Run an ex command.
    fn command(&self, command: String) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug)]
pub enum HostRequest {
    CurrentDir {
        reply: oneshot::Sender<Result<Value>>,
    },
    ListBuffers {
        reply: oneshot::Sender<Result<Value>>,
    },
    Command {
        command: String,
        reply: oneshot::Sender<Result<()>>,
    },
}

#[derive(Debug, Clone)]
pub struct HostHandle {
    requests: mpsc::Sender<HostRequest>,
}

impl HostHandle {
    /// Create a handle and the receiver the transport services.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<HostRequest>) {
        let (requests, rx) = mpsc::channel(capacity.max(1));
        (Self { requests }, rx)
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> HostRequest) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(make(reply))
            .await
            .map_err(|_| anyhow!("host transport closed"))?;
        response.await.context("host dropped the request")
    }
}

impl Host for HostHandle {
    async fn current_dir(&self) -> Result<String> {
        let value = self
            .request(|reply| HostRequest::CurrentDir { reply })
            .await??;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("cwd is not a string: {value}"))
    }

    async fn list_buffers(&self) -> Result<Vec<HostBuffer>> {
        let value = self
            .request(|reply| HostRequest::ListBuffers { reply })
            .await??;
        if value.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value).context("malformed buffer list")
    }

    async fn command(&self, command: String) -> Result<()> {
        self.request(|reply| HostRequest::Command { command, reply })
            .await?
    }
}
