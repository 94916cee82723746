use std::sync::Arc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
  layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
  widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tokio::{sync::mpsc::UnboundedSender, task::spawn};
use tracing::{debug, error, info, warn};

use super::{
  Attribute, Attributes, ConfirmLabel, ConfirmModal, DeleteOutcome, ItemKey, ModalTarget, RenderField, style,
};
use crate::{
  action::Action,
  api::VideoApi,
  components::{AsyncComponent, Component},
  tui::{Event, Frame},
};

/// Rows a card needs to show every field.
pub const CARD_HEIGHT: u16 = 12;
/// Shown in the confirmation overlay when no `name` was assigned.
pub const FALLBACK_NAME: &str = "This video";
/// Duration badge text until a `duration` is assigned.
pub const PLACEHOLDER_DURATION: &str = "1:50";

const DELETE_TRIGGER_TEXT: &str = " Delete ";
const PLAY_GLYPH: &str = "▶";

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderSurface {
  title: Option<String>,
  description: Option<String>,
  thumbnail_source: Option<String>,
  duration_badge: String,
}

impl Default for RenderSurface {
  fn default() -> Self {
    RenderSurface {
      title: None,
      description: None,
      thumbnail_source: None,
      duration_badge: PLACEHOLDER_DURATION.to_string(),
    }
  }
}

impl RenderSurface {
  fn apply(&mut self, field: RenderField, value: &str) {
    match field {
      RenderField::Title => self.title = Some(value.to_string()),
      RenderField::Description => self.description = Some(value.to_string()),
      RenderField::ThumbnailSource => self.thumbnail_source = Some(value.to_string()),
      RenderField::DurationBadge => self.duration_badge = value.to_string(),
    }
  }

  fn get(&self, field: RenderField) -> Option<&str> {
    match field {
      RenderField::Title => self.title.as_deref(),
      RenderField::Description => self.description.as_deref(),
      RenderField::ThumbnailSource => self.thumbnail_source.as_deref(),
      RenderField::DurationBadge => Some(self.duration_badge.as_str()),
    }
  }
}

/// One gallery entry: a card that plays its video when clicked, with a delete
/// trigger guarded by a confirmation overlay.
///
/// Clicks are hit-tested against the regions painted on the last draw. While
/// the overlay is visible it takes every click.
pub struct VideoItem {
  key: ItemKey,
  api: Arc<dyn VideoApi>,
  attributes: Attributes,
  surface: RenderSurface,
  modal: ConfirmModal,
  selected: bool,
  attached: bool,
  delete_in_flight: bool,
  card_area: Rect,
  delete_trigger_area: Rect,
  action_tx: Option<UnboundedSender<Action>>,
}

impl VideoItem {
  pub fn new(api: Arc<dyn VideoApi>) -> Self {
    VideoItem {
      key: ItemKey::next(),
      api,
      attributes: Attributes::default(),
      surface: RenderSurface::default(),
      modal: ConfirmModal::default(),
      selected: false,
      attached: true,
      delete_in_flight: false,
      card_area: Rect::default(),
      delete_trigger_area: Rect::default(),
      action_tx: None,
    }
  }

  pub fn key(&self) -> ItemKey {
    self.key
  }

  /// Assigns an attribute by its wire name. Names that are not observed are ignored.
  pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
    match name.parse::<Attribute>() {
      Ok(attribute) => self.set(attribute, value),
      Err(_) => {
        debug!("Ignoring unobserved attribute '{}'", name);
        false
      },
    }
  }

  /// Returns whether anything changed. Re-assigning the current value is a no-op.
  pub fn set(&mut self, attribute: Attribute, value: &str) -> bool {
    if !self.attributes.set(attribute, value) {
      return false;
    }
    if let Some(field) = attribute.render_field() {
      self.surface.apply(field, value);
    }
    true
  }

  pub fn attribute(&self, attribute: Attribute) -> Option<&str> {
    self.attributes.get(attribute)
  }

  /// Text currently shown in a card field.
  pub fn field(&self, field: RenderField) -> Option<&str> {
    self.surface.get(field)
  }

  pub fn confirmation(&self) -> &ConfirmModal {
    &self.modal
  }

  pub fn is_confirmation_visible(&self) -> bool {
    self.modal.is_visible()
  }

  pub fn is_delete_in_flight(&self) -> bool {
    self.delete_in_flight
  }

  pub fn is_attached(&self) -> bool {
    self.attached
  }

  /// Called by the host when it unmounts the item for its own reasons.
  pub fn detach(&mut self) {
    self.attached = false;
    self.modal.hide();
    self.clear_hit_regions();
  }

  pub fn set_selected(&mut self, selected: bool) {
    self.selected = selected;
  }

  pub fn card_area(&self) -> Rect {
    self.card_area
  }

  pub fn delete_trigger_area(&self) -> Rect {
    self.delete_trigger_area
  }

  /// Forgets the card regions, e.g. when the host scrolls the card out of view.
  pub fn clear_hit_regions(&mut self) {
    self.card_area = Rect::default();
    self.delete_trigger_area = Rect::default();
  }

  fn video_id(&self) -> &str {
    match self.attributes.get(Attribute::VideoId) {
      Some(id) => id,
      None => {
        warn!("Video item {:?} has no video-id, forwarding an empty identifier", self.key);
        ""
      },
    }
  }

  pub fn play(&self) -> Action {
    let url = self.api.watch_url(self.video_id());
    info!("Playing {}", url);
    Action::Navigate(url)
  }

  /// Shows the overlay with the current name. Opening an open overlay only refreshes the name.
  pub fn open_confirmation(&mut self) -> Option<Action> {
    if !self.attached {
      return None;
    }
    let name = self.attributes.get(Attribute::Name).filter(|name| !name.is_empty()).unwrap_or(FALLBACK_NAME);
    self.modal.open(name);
    Some(Action::EnterConfirmMode)
  }

  pub fn cancel_confirmation(&mut self) -> Option<Action> {
    if !self.modal.is_visible() {
      return None;
    }
    self.modal.hide();
    Some(Action::ExitConfirmMode)
  }

  /// Hides the overlay and sends the delete request. Ignored while a request is outstanding.
  pub fn confirm_delete(&mut self) -> Option<Action> {
    if !self.attached || !self.modal.is_visible() {
      return None;
    }
    if self.delete_in_flight {
      debug!("Delete of {:?} already in flight, ignoring confirm", self.key);
      return None;
    }
    self.modal.hide();
    self.start_delete();
    Some(Action::ExitConfirmMode)
  }

  fn start_delete(&mut self) {
    self.delete_in_flight = true;
    self.modal.set_confirm_label(ConfirmLabel::Deleting);

    let key = self.key;
    let video_id = self.video_id().to_string();
    let api = self.api.clone();
    let tx = self.action_tx.clone();
    info!("Deleting video '{}'", video_id);

    spawn(async move {
      let outcome = match api.delete_video(&video_id).await {
        Ok(()) => DeleteOutcome::Deleted,
        Err(err) => DeleteOutcome::Failed(err.to_string()),
      };
      match tx {
        Some(tx) => {
          if let Err(e) = tx.send(Action::DeleteSettled(key, outcome)) {
            error!("Failed to send action: {}", e);
          }
        },
        None => warn!("Delete of '{}' settled with no action handler registered", video_id),
      }
    });
  }

  fn on_delete_settled(&mut self, outcome: DeleteOutcome) -> Option<Action> {
    self.delete_in_flight = false;
    if !self.attached {
      debug!("Delete of {:?} settled after it was detached", self.key);
      return None;
    }
    match outcome {
      // An overlay reopened while the request was in flight stays up until the
      // host detaches the item, so the host can see it was confirming.
      DeleteOutcome::Deleted => {
        self.attached = false;
        Some(Action::RemoveItem(self.key))
      },
      DeleteOutcome::Failed(reason) => {
        error!("Error deleting video '{}': {}", self.video_id(), reason);
        self.modal.set_confirm_label(ConfirmLabel::Error);
        Some(Action::Render)
      },
    }
  }

  /// Routes one click. The delete trigger wins over play, and a visible overlay wins over both.
  pub fn handle_click(&mut self, position: Position) -> Option<Action> {
    if !self.attached {
      return None;
    }
    if let Some(target) = self.modal.hit_test(position) {
      return match target {
        ModalTarget::Confirm => self.confirm_delete(),
        ModalTarget::Cancel | ModalTarget::Scrim => self.cancel_confirmation(),
        ModalTarget::Panel => None,
      };
    }
    if self.delete_trigger_area.contains(position) {
      return self.open_confirmation();
    }
    if self.card_area.contains(position) {
      return Some(self.play());
    }
    None
  }

  pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
      MouseEventKind::Down(MouseButton::Left) => self.handle_click(Position::new(mouse.column, mouse.row)),
      _ => None,
    }
  }

  /// Paints the overlay over the whole frame. Hosts call this after every card is drawn.
  pub fn draw_overlay(&mut self, frame: &mut Frame<'_>) {
    self.modal.draw(frame);
  }

  fn draw_thumbnail(&self, frame: &mut Frame<'_>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).border_style(style::thumbnail());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
      return;
    }

    let source = self.surface.thumbnail_source.as_deref().unwrap_or_default();
    frame.render_widget(Paragraph::new(source).style(style::thumbnail()), Rect { height: 1, ..inner });

    let middle = Rect { y: inner.y + inner.height / 2, height: 1, ..inner };
    frame.render_widget(Paragraph::new(PLAY_GLYPH).style(style::play_glyph()).alignment(Alignment::Center), middle);

    let badge = format!(" {} ", self.surface.duration_badge);
    let badge_width = (badge.chars().count() as u16).min(inner.width);
    let badge_area = Rect::new(inner.right() - badge_width, inner.bottom() - 1, badge_width, 1);
    frame.render_widget(Paragraph::new(badge).style(style::duration_badge()), badge_area);
  }
}

impl Component for VideoItem {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> color_eyre::Result<()> {
    self.action_tx = Some(tx);
    Ok(())
  }

  fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    self.card_area = area;
    let block = Block::default()
      .borders(Borders::ALL)
      .border_type(BorderType::Rounded)
      .border_style(style::card_border(self.selected))
      .style(style::card(self.selected));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(2), Constraint::Length(1)])
      .split(inner);

    self.draw_thumbnail(frame, rows[0]);
    frame.render_widget(Paragraph::new(self.surface.title.as_deref().unwrap_or_default()).style(style::title()), rows[1]);
    frame.render_widget(
      Paragraph::new(self.surface.description.as_deref().unwrap_or_default())
        .style(style::description())
        .wrap(Wrap { trim: true }),
      rows[2],
    );

    let footer = rows[3];
    let trigger_width = DELETE_TRIGGER_TEXT.len() as u16;
    self.delete_trigger_area =
      Rect::new(footer.right().saturating_sub(trigger_width), footer.y, trigger_width, footer.height.min(1))
        .intersection(footer);
    frame.render_widget(Paragraph::new(DELETE_TRIGGER_TEXT).style(style::delete_trigger()), self.delete_trigger_area);
    Ok(())
  }
}

#[async_trait::async_trait]
impl AsyncComponent for VideoItem {
  async fn handle_events(&mut self, event: Option<Event>) -> color_eyre::Result<Option<Action>> {
    match event {
      Some(Event::Mouse(mouse)) => Ok(self.handle_mouse_event(mouse)),
      _ => Ok(None),
    }
  }

  async fn update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
    match action {
      Action::DeleteSettled(key, outcome) if key == self.key => Ok(self.on_delete_settled(outcome)),
      _ => Ok(None),
    }
  }
}
