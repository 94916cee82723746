use ratatui::{
  layout::Rect,
  style::{Color, Style},
  widgets::{Block, Borders, Paragraph},
};

use crate::tui::Frame;

#[derive(Default)]
pub struct InstructionFooter {}

impl InstructionFooter {
  pub fn instructions(confirming: bool, has_items: bool) -> Vec<&'static str> {
    if confirming {
      return vec!["y/enter: Delete", "n/esc: Cancel", "click outside: Cancel"];
    }
    let mut instructions = vec!["q: Quit"];
    if has_items {
      instructions.extend(["↑/↓: Select", "enter/click: Play", "d: Delete"]);
    }
    instructions
  }

  pub fn render(&self, frame: &mut Frame<'_>, area: Rect, confirming: bool, has_items: bool) {
    let text = Self::instructions(confirming, has_items).join(" | ");
    let paragraph =
      Paragraph::new(text).block(Block::default().borders(Borders::ALL)).style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
  }
}
