use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::VideoApi;
use crate::error::Error;

/// In-memory backend for tests.
///
/// Identifiers containing `fail` get a 500, identifiers containing `offline`
/// fail as if the request never reached the server. Everything else succeeds.
#[derive(Clone, Debug)]
pub struct MockVideoApi {
  base_url: String,
  deleted: Arc<Mutex<Vec<String>>>,
  gate: Option<Arc<Notify>>,
}

impl MockVideoApi {
  pub fn new(base_url: impl Into<String>) -> Self {
    MockVideoApi { base_url: base_url.into(), deleted: Arc::new(Mutex::new(Vec::new())), gate: None }
  }

  /// Holds every delete request until the returned handle is notified once per request.
  pub fn hold_requests(&mut self) -> Arc<Notify> {
    let gate = Arc::new(Notify::new());
    self.gate = Some(gate.clone());
    gate
  }

  /// Identifiers passed to `delete_video`, in call order.
  pub fn delete_calls(&self) -> Vec<String> {
    self.deleted.lock().map(|calls| calls.clone()).unwrap_or_default()
  }
}

impl Default for MockVideoApi {
  fn default() -> Self {
    MockVideoApi::new("http://localhost:8080")
  }
}

#[async_trait]
impl VideoApi for MockVideoApi {
  fn base_url(&self) -> &str {
    &self.base_url
  }

  async fn delete_video(&self, video_id: &str) -> Result<(), Error> {
    if let Ok(mut calls) = self.deleted.lock() {
      calls.push(video_id.to_string());
    }
    if let Some(gate) = &self.gate {
      gate.notified().await;
    }
    match video_id {
      id if id.contains("offline") => Err(Error::Request("connection refused".to_string())),
      id if id.contains("fail") => Err(Error::Status(500)),
      _ => Ok(()),
    }
  }
}
