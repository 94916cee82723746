use async_trait::async_trait;

use crate::error::Error;

/// Boundary to the video storage backend.
///
/// Every `VideoItem` is handed one of these at construction, so the API base is
/// always present when an action fires.
#[async_trait]
pub trait VideoApi: Send + Sync {
  /// Root URL prefix of the backend, used verbatim.
  fn base_url(&self) -> &str;

  /// Page that plays the video. The identifier is appended as-is.
  fn watch_url(&self, video_id: &str) -> String {
    format!("{}/watch?v={}", self.base_url(), video_id)
  }

  fn delete_url(&self, video_id: &str) -> String {
    format!("{}/video/{}", self.base_url(), video_id)
  }

  /// Issues `DELETE {base}/video/{id}`. Any 2xx response is a success.
  async fn delete_video(&self, video_id: &str) -> Result<(), Error>;
}
