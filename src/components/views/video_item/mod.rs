use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

mod attributes;
mod confirm_modal;
mod item;
mod style;

pub use attributes::{Attribute, Attributes, RenderField};
pub use confirm_modal::{ConfirmLabel, ConfirmModal, ModalTarget, Visibility};
pub use item::{CARD_HEIGHT, FALLBACK_NAME, PLACEHOLDER_DURATION, VideoItem};

/// Identity of one mounted item, used to route a delete result back to the instance that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey(u64);

impl ItemKey {
  pub fn next() -> Self {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    ItemKey(NEXT.fetch_add(1, Ordering::Relaxed))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteOutcome {
  Deleted,
  Failed(String),
}
