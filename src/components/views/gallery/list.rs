use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
  layout::{Constraint, Direction, Layout, Position, Rect},
  style::{Color, Style},
  widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

use super::InstructionFooter;
use crate::{
  action::Action,
  api::VideoApi,
  components::{
    AsyncComponent, Component,
    views::video_item::{CARD_HEIGHT, ItemKey, VideoItem},
  },
  config::VideoEntry,
  tui::{Event, Frame},
};

/// Host for a column of `VideoItem`s.
///
/// It only mounts the configured entries, routes input to them and drops an
/// item once it reports its own deletion.
pub struct Gallery {
  api: Arc<dyn VideoApi>,
  items: Vec<VideoItem>,
  selected_index: usize,
  instruction_footer: InstructionFooter,
  action_tx: Option<UnboundedSender<Action>>,
}

impl Gallery {
  pub fn new(api: Arc<dyn VideoApi>, entries: &[VideoEntry]) -> Self {
    let mut gallery = Gallery {
      api,
      items: Vec::new(),
      selected_index: 0,
      instruction_footer: InstructionFooter::default(),
      action_tx: None,
    };
    for entry in entries {
      gallery.mount(entry);
    }
    gallery
  }

  /// Creates an item and assigns the entry's attributes by wire name.
  pub fn mount(&mut self, entry: &VideoEntry) -> ItemKey {
    let mut item = VideoItem::new(self.api.clone());
    for (attribute, value) in entry.attributes() {
      item.set_attribute(attribute.as_ref(), value);
    }
    if let Some(tx) = &self.action_tx {
      if let Err(e) = item.register_action_handler(tx.clone()) {
        error!("Failed to register action handler: {}", e);
      }
    }
    let key = item.key();
    self.items.push(item);
    key
  }

  pub fn items(&self) -> &[VideoItem] {
    &self.items
  }

  pub fn item(&self, key: ItemKey) -> Option<&VideoItem> {
    self.items.iter().find(|item| item.key() == key)
  }

  pub fn selected_index(&self) -> usize {
    self.selected_index
  }

  pub fn is_confirming(&self) -> bool {
    self.items.iter().any(VideoItem::is_confirmation_visible)
  }

  fn selected_mut(&mut self) -> Option<&mut VideoItem> {
    self.items.get_mut(self.selected_index)
  }

  fn confirming_mut(&mut self) -> Option<&mut VideoItem> {
    self.items.iter_mut().find(|item| item.is_confirmation_visible())
  }

  pub fn select_next(&mut self) {
    let count = self.items.len();
    if count == 0 {
      return;
    }
    self.selected_index = if self.selected_index >= count - 1 { 0 } else { self.selected_index + 1 };
  }

  pub fn select_previous(&mut self) {
    let count = self.items.len();
    if count == 0 {
      return;
    }
    self.selected_index = if self.selected_index == 0 { count - 1 } else { self.selected_index - 1 };
  }

  fn remove(&mut self, key: ItemKey) -> Option<Action> {
    let index = self.items.iter().position(|item| item.key() == key)?;
    let mut item = self.items.remove(index);
    let was_confirming = item.is_confirmation_visible();
    item.detach();
    info!("Removed {:?} from the gallery", key);

    let count = self.items.len();
    if count == 0 {
      self.selected_index = 0;
    } else if self.selected_index >= count {
      self.selected_index = count - 1;
    }
    if was_confirming { Some(Action::ExitConfirmMode) } else { Some(Action::Render) }
  }

  fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Option<Action> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
      return None;
    }
    if let Some(item) = self.confirming_mut() {
      return item.handle_mouse_event(mouse);
    }
    let position = Position::new(mouse.column, mouse.row);
    let index = self.items.iter().position(|item| item.card_area().contains(position))?;
    self.selected_index = index;
    self.items[index].handle_mouse_event(mouse)
  }

  fn handle_key_event(&self, key: KeyEvent) -> Option<Action> {
    if self.is_confirming() {
      return match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::ConfirmDelete),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::CancelDelete),
        _ => None,
      };
    }
    match key {
      KeyEvent { code: KeyCode::Up | KeyCode::Char('k'), .. } => Some(Action::SelectPrevious),
      KeyEvent { code: KeyCode::Down | KeyCode::Char('j'), .. } => Some(Action::SelectNext),
      KeyEvent { code: KeyCode::Enter, .. } => Some(Action::PlaySelected),
      KeyEvent { code: KeyCode::Char('d' | 'D'), modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT, .. } => {
        Some(Action::OpenDeleteConfirmation)
      },
      _ => None,
    }
  }

  fn render_cards(&mut self, frame: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    let block = Block::default().title(format!("Videos ({})", self.items.len())).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if self.items.is_empty() {
      frame.render_widget(Paragraph::new("No videos").style(Style::default().fg(Color::DarkGray)), inner);
      return Ok(());
    }

    let per_page = usize::from((inner.height / CARD_HEIGHT).max(1));
    let first = self.selected_index.saturating_sub(per_page - 1);
    let selected = self.selected_index;
    for (index, item) in self.items.iter_mut().enumerate() {
      match index.checked_sub(first).filter(|slot| *slot < per_page) {
        Some(slot) => {
          let y = inner.y + slot as u16 * CARD_HEIGHT;
          let card = Rect::new(inner.x, y, inner.width, CARD_HEIGHT).intersection(inner);
          item.set_selected(index == selected);
          item.draw(frame, card)?;
        },
        None => item.clear_hit_regions(),
      }
    }
    Ok(())
  }
}

impl Component for Gallery {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> color_eyre::Result<()> {
    for item in &mut self.items {
      item.register_action_handler(tx.clone())?;
    }
    self.action_tx = Some(tx);
    Ok(())
  }

  fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(1), Constraint::Length(3)])
      .split(area);

    self.render_cards(frame, chunks[0])?;
    self.instruction_footer.render(frame, chunks[1], self.is_confirming(), !self.items.is_empty());

    if let Some(item) = self.confirming_mut() {
      item.draw_overlay(frame);
    }
    Ok(())
  }
}

#[async_trait::async_trait]
impl AsyncComponent for Gallery {
  async fn handle_events(&mut self, event: Option<Event>) -> color_eyre::Result<Option<Action>> {
    match event {
      Some(Event::Mouse(mouse)) => Ok(self.handle_mouse_event(mouse)),
      Some(Event::Key(key)) => Ok(self.handle_key_event(key)),
      _ => Ok(None),
    }
  }

  async fn update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
    match action {
      Action::SelectNext => {
        self.select_next();
        Ok(Some(Action::Render))
      },
      Action::SelectPrevious => {
        self.select_previous();
        Ok(Some(Action::Render))
      },
      Action::PlaySelected => Ok(self.selected_mut().map(|item| item.play())),
      Action::OpenDeleteConfirmation => Ok(self.selected_mut().and_then(VideoItem::open_confirmation)),
      Action::ConfirmDelete => Ok(self.confirming_mut().and_then(VideoItem::confirm_delete)),
      Action::CancelDelete => Ok(self.confirming_mut().and_then(VideoItem::cancel_confirmation)),
      Action::DeleteSettled(key, _) => match self.items.iter_mut().find(|item| item.key() == key) {
        Some(item) => item.update(action).await,
        None => {
          debug!("Delete of {:?} settled after it left the gallery", key);
          Ok(None)
        },
      },
      Action::RemoveItem(key) => Ok(self.remove(key)),
      _ => Ok(None),
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use ratatui::{Terminal, backend::TestBackend};
  use tokio::sync::mpsc::{self, UnboundedReceiver};

  use super::*;
  use crate::{api::MockVideoApi, components::views::video_item::DeleteOutcome};

  fn entry(name: &str, video_id: &str) -> VideoEntry {
    VideoEntry {
      name: Some(name.to_string()),
      video_id: Some(video_id.to_string()),
      duration: Some("1:50".to_string()),
      ..Default::default()
    }
  }

  fn gallery(api: Arc<MockVideoApi>) -> (Gallery, UnboundedReceiver<Action>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut gallery = Gallery::new(api, &[entry("Sunset", "42"), entry("Harbour", "7")]);
    gallery.register_action_handler(tx).unwrap();
    draw(&mut gallery);
    (gallery, rx)
  }

  fn draw(gallery: &mut Gallery) {
    let mut terminal = Terminal::new(TestBackend::new(60, 40)).unwrap();
    terminal
      .draw(|f| {
        let area = f.area();
        gallery.draw(f, area).unwrap();
      })
      .unwrap();
  }

  fn left_click(position: Position) -> Event {
    Event::Mouse(MouseEvent {
      kind: MouseEventKind::Down(MouseButton::Left),
      column: position.x,
      row: position.y,
      modifiers: KeyModifiers::NONE,
    })
  }

  fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
  }

  fn body(area: Rect) -> Position {
    Position::new(area.x + 2, area.y + 2)
  }

  #[tokio::test]
  async fn test_mount_assigns_attributes() {
    let (gallery, _rx) = gallery(Arc::new(MockVideoApi::default()));

    assert_eq!(gallery.items().len(), 2);
    assert_eq!(gallery.items()[1].attribute(crate::components::views::video_item::Attribute::VideoId), Some("7"));
  }

  #[tokio::test]
  async fn test_click_plays_the_clicked_card() {
    let (mut gallery, _rx) = gallery(Arc::new(MockVideoApi::default()));
    let second = gallery.items()[1].card_area();

    let action = gallery.handle_events(Some(left_click(body(second)))).await.unwrap();

    assert_eq!(action, Some(Action::Navigate("http://localhost:8080/watch?v=7".to_string())));
    assert_eq!(gallery.selected_index(), 1);
  }

  #[tokio::test]
  async fn test_overlay_takes_every_click() {
    let (mut gallery, _rx) = gallery(Arc::new(MockVideoApi::default()));
    let trigger = gallery.items()[0].delete_trigger_area();
    let second = gallery.items()[1].card_area();

    let opened = gallery.handle_events(Some(left_click(Position::new(trigger.x, trigger.y)))).await.unwrap();
    assert_eq!(opened, Some(Action::EnterConfirmMode));
    draw(&mut gallery);

    let action = gallery.handle_events(Some(left_click(body(second)))).await.unwrap();

    assert_eq!(action, Some(Action::ExitConfirmMode));
    assert!(!gallery.is_confirming());
  }

  #[tokio::test]
  async fn test_key_bindings() {
    let (mut gallery, _rx) = gallery(Arc::new(MockVideoApi::default()));

    assert_eq!(gallery.handle_events(Some(key(KeyCode::Down))).await.unwrap(), Some(Action::SelectNext));
    assert_eq!(gallery.handle_events(Some(key(KeyCode::Up))).await.unwrap(), Some(Action::SelectPrevious));
    assert_eq!(gallery.handle_events(Some(key(KeyCode::Enter))).await.unwrap(), Some(Action::PlaySelected));
    assert_eq!(
      gallery.handle_events(Some(key(KeyCode::Char('d')))).await.unwrap(),
      Some(Action::OpenDeleteConfirmation)
    );

    gallery.update(Action::OpenDeleteConfirmation).await.unwrap();
    assert_eq!(gallery.handle_events(Some(key(KeyCode::Char('y')))).await.unwrap(), Some(Action::ConfirmDelete));
    assert_eq!(gallery.handle_events(Some(key(KeyCode::Esc))).await.unwrap(), Some(Action::CancelDelete));
  }

  #[tokio::test]
  async fn test_selection_wraps() {
    let (mut gallery, _rx) = gallery(Arc::new(MockVideoApi::default()));

    gallery.update(Action::SelectPrevious).await.unwrap();
    assert_eq!(gallery.selected_index(), 1);
    gallery.update(Action::SelectNext).await.unwrap();
    assert_eq!(gallery.selected_index(), 0);
  }

  #[tokio::test]
  async fn test_play_selected() {
    let (mut gallery, _rx) = gallery(Arc::new(MockVideoApi::default()));
    gallery.update(Action::SelectNext).await.unwrap();

    let action = gallery.update(Action::PlaySelected).await.unwrap();

    assert_eq!(action, Some(Action::Navigate("http://localhost:8080/watch?v=7".to_string())));
  }

  #[tokio::test]
  async fn test_confirmed_delete_removes_card() {
    let api = Arc::new(MockVideoApi::default());
    let (mut gallery, mut rx) = gallery(api.clone());
    gallery.update(Action::SelectNext).await.unwrap();

    gallery.update(Action::OpenDeleteConfirmation).await.unwrap();
    assert_eq!(gallery.update(Action::ConfirmDelete).await.unwrap(), Some(Action::ExitConfirmMode));

    let settled = rx.recv().await.unwrap();
    let removal = gallery.update(settled).await.unwrap();
    let Some(Action::RemoveItem(key)) = removal.clone() else {
      panic!("Expected Action::RemoveItem, got {removal:?}");
    };
    gallery.update(Action::RemoveItem(key)).await.unwrap();

    assert_eq!(api.delete_calls(), vec!["7".to_string()]);
    assert_eq!(gallery.items().len(), 1);
    assert!(gallery.item(key).is_none());
    assert_eq!(gallery.selected_index(), 0);
  }

  #[tokio::test]
  async fn test_removal_with_reopened_overlay_exits_confirm_mode() {
    let mut api = MockVideoApi::default();
    let gate = api.hold_requests();
    let api = Arc::new(api);
    let (mut gallery, mut rx) = gallery(api.clone());

    gallery.update(Action::OpenDeleteConfirmation).await.unwrap();
    gallery.update(Action::ConfirmDelete).await.unwrap();
    assert_eq!(gallery.update(Action::OpenDeleteConfirmation).await.unwrap(), Some(Action::EnterConfirmMode));

    gate.notify_one();
    let settled = rx.recv().await.unwrap();
    let Some(Action::RemoveItem(key)) = gallery.update(settled).await.unwrap() else {
      panic!("Expected Action::RemoveItem");
    };

    assert_eq!(gallery.update(Action::RemoveItem(key)).await.unwrap(), Some(Action::ExitConfirmMode));
    assert!(!gallery.is_confirming());
    assert_eq!(gallery.items().len(), 1);
    assert_eq!(api.delete_calls(), vec!["42".to_string()]);
  }

  #[tokio::test]
  async fn test_failed_delete_keeps_card() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut gallery = Gallery::new(Arc::new(MockVideoApi::default()), &[entry("Broken", "fail-1")]);
    gallery.register_action_handler(tx).unwrap();

    gallery.update(Action::OpenDeleteConfirmation).await.unwrap();
    gallery.update(Action::ConfirmDelete).await.unwrap();
    let settled = rx.recv().await.unwrap();

    assert_eq!(gallery.update(settled).await.unwrap(), Some(Action::Render));
    assert_eq!(gallery.items().len(), 1);
  }

  #[tokio::test]
  async fn test_result_for_removed_item_is_dropped() {
    let (mut gallery, _rx) = gallery(Arc::new(MockVideoApi::default()));
    let key = gallery.items()[0].key();
    gallery.update(Action::RemoveItem(key)).await.unwrap();

    let action = gallery.update(Action::DeleteSettled(key, DeleteOutcome::Deleted)).await.unwrap();

    assert_eq!(action, None);
    assert_eq!(gallery.items().len(), 1);
  }

  #[tokio::test]
  async fn test_empty_gallery() {
    let mut gallery = Gallery::new(Arc::new(MockVideoApi::default()), &[]);
    draw(&mut gallery);

    assert_eq!(gallery.update(Action::PlaySelected).await.unwrap(), None);
    assert_eq!(gallery.update(Action::OpenDeleteConfirmation).await.unwrap(), None);
  }
}
