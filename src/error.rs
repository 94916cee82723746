use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Http(#[from] reqwest::Error),
  #[error("request failed: {0}")]
  Request(String),
  #[error("server responded with status {0}")]
  Status(u16),
}
