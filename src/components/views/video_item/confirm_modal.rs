use ratatui::{
  layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
  widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use strum::Display;

use super::style;
use crate::tui::Frame;

const PANEL_WIDTH: u16 = 52;
const PANEL_HEIGHT: u16 = 8;
const BUTTON_GAP: u16 = 2;
const CANCEL_TEXT: &str = " Cancel ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
  #[default]
  Hidden,
  Visible,
}

/// Text on the confirm button, which doubles as the delete progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum ConfirmLabel {
  #[default]
  #[strum(serialize = "Delete")]
  Delete,
  #[strum(serialize = "Deleting...")]
  Deleting,
  #[strum(serialize = "Error")]
  Error,
}

/// What a click landed on while the overlay is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
  Cancel,
  Confirm,
  Panel,
  Scrim,
}

/// Full-screen confirmation overlay owned by one `VideoItem`.
#[derive(Debug, Default)]
pub struct ConfirmModal {
  visibility: Visibility,
  item_name: String,
  confirm_label: ConfirmLabel,
  laid_out: bool,
  panel_area: Rect,
  cancel_area: Rect,
  confirm_area: Rect,
}

impl ConfirmModal {
  pub const PROMPT: &'static str = "Are you sure you want to delete this video?";

  pub fn open(&mut self, item_name: &str) {
    self.item_name = item_name.to_string();
    self.visibility = Visibility::Visible;
  }

  pub fn hide(&mut self) {
    self.visibility = Visibility::Hidden;
    self.laid_out = false;
  }

  pub fn visibility(&self) -> Visibility {
    self.visibility
  }

  pub fn is_visible(&self) -> bool {
    self.visibility == Visibility::Visible
  }

  pub fn item_name(&self) -> &str {
    &self.item_name
  }

  pub fn confirm_label(&self) -> ConfirmLabel {
    self.confirm_label
  }

  pub fn set_confirm_label(&mut self, label: ConfirmLabel) {
    self.confirm_label = label;
  }

  pub fn panel_area(&self) -> Rect {
    self.panel_area
  }

  pub fn cancel_area(&self) -> Rect {
    self.cancel_area
  }

  pub fn confirm_area(&self) -> Rect {
    self.confirm_area
  }

  /// Anything outside the panel is scrim. Until the overlay has been drawn the
  /// click is swallowed as a panel click, since the regions are not known yet.
  pub fn hit_test(&self, position: Position) -> Option<ModalTarget> {
    if !self.is_visible() {
      return None;
    }
    if !self.laid_out {
      return Some(ModalTarget::Panel);
    }
    let target = if self.confirm_area.contains(position) {
      ModalTarget::Confirm
    } else if self.cancel_area.contains(position) {
      ModalTarget::Cancel
    } else if self.panel_area.contains(position) {
      ModalTarget::Panel
    } else {
      ModalTarget::Scrim
    };
    Some(target)
  }

  pub fn draw(&mut self, frame: &mut Frame<'_>) {
    if !self.is_visible() {
      return;
    }
    let area = frame.area();
    frame.buffer_mut().set_style(area, style::scrim());

    let panel = centered(area, PANEL_WIDTH.min(area.width), PANEL_HEIGHT.min(area.height));
    self.panel_area = panel;
    frame.render_widget(Clear, panel);
    let block = Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).style(style::panel());
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(inner);
    frame.render_widget(Paragraph::new(Self::PROMPT).alignment(Alignment::Center), rows[0]);
    frame.render_widget(
      Paragraph::new(self.item_name.as_str()).style(style::title()).alignment(Alignment::Center),
      rows[2],
    );

    let confirm_text = format!(" {} ", self.confirm_label);
    let cancel_width = CANCEL_TEXT.len() as u16;
    let confirm_width = confirm_text.len() as u16;
    let buttons = rows[4];
    let left = buttons.x + buttons.width.saturating_sub(cancel_width + BUTTON_GAP + confirm_width) / 2;
    self.cancel_area = Rect::new(left, buttons.y, cancel_width, 1).intersection(buttons);
    self.confirm_area =
      Rect::new(left + cancel_width + BUTTON_GAP, buttons.y, confirm_width, 1).intersection(buttons);
    frame.render_widget(Paragraph::new(CANCEL_TEXT).style(style::cancel_button()), self.cancel_area);
    frame.render_widget(Paragraph::new(confirm_text).style(style::confirm_button()), self.confirm_area);
    self.laid_out = true;
  }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
  Rect::new(area.x + (area.width - width) / 2, area.y + (area.height - height) / 2, width, height)
}
