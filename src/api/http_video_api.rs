use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::VideoApi;
use crate::error::Error;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct HttpVideoApi {
  client: Client,
  base_url: String,
}

impl HttpVideoApi {
  pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(Self::with_client(client, base_url))
  }

  pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
    HttpVideoApi { client, base_url: base_url.into() }
  }
}

#[async_trait]
impl VideoApi for HttpVideoApi {
  fn base_url(&self) -> &str {
    &self.base_url
  }

  async fn delete_video(&self, video_id: &str) -> Result<(), Error> {
    let url = self.delete_url(video_id);
    debug!("DELETE {}", url);
    let response = self.client.delete(&url).send().await?;
    let status = response.status();
    if status.is_success() {
      info!("Deleted video '{}' ({})", video_id, status);
      Ok(())
    } else {
      Err(Error::Status(status.as_u16()))
    }
  }
}
