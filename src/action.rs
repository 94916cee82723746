use serde::{Deserialize, Serialize};
use strum::Display;

use crate::components::views::video_item::{DeleteOutcome, ItemKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  CancelDelete,
  ConfirmDelete,
  DeleteSettled(ItemKey, DeleteOutcome),
  EnterConfirmMode,
  Error(String),
  ExitConfirmMode,
  Navigate(String),
  OpenDeleteConfirmation,
  PlaySelected,
  Quit,
  RemoveItem(ItemKey),
  Render,
  Resize(u16, u16),
  Resume,
  SelectNext,
  SelectPrevious,
  Suspend,
  Tick,
}
