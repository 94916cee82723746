use std::sync::Arc;

use httpmock::{Method::DELETE, MockServer};
use pretty_assertions::assert_eq;
use ratatui::{
  Terminal,
  backend::TestBackend,
  layout::{Position, Rect},
};
use tokio::sync::mpsc;
use video_gallery::{
  action::Action,
  api::HttpVideoApi,
  components::{
    AsyncComponent, Component,
    views::video_item::{CARD_HEIGHT, ConfirmLabel, DeleteOutcome, VideoItem},
  },
};

fn draw(item: &mut VideoItem) {
  let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
  terminal
    .draw(|f| {
      item.draw(f, Rect::new(0, 0, 60, CARD_HEIGHT)).unwrap();
      item.draw_overlay(f);
    })
    .unwrap();
}

fn corner(area: Rect) -> Position {
  Position::new(area.x, area.y)
}

async fn sunset_against(server: &MockServer) -> (VideoItem, mpsc::UnboundedReceiver<Action>) {
  let (tx, rx) = mpsc::unbounded_channel();
  let mut item = VideoItem::new(Arc::new(HttpVideoApi::new(server.base_url()).unwrap()));
  item.register_action_handler(tx).unwrap();
  item.set_attribute("name", "Sunset");
  item.set_attribute("video-id", "42");
  draw(&mut item);
  (item, rx)
}

async fn click_delete_then_confirm(item: &mut VideoItem) {
  assert_eq!(item.handle_click(corner(item.delete_trigger_area())), Some(Action::EnterConfirmMode));
  draw(item);
  assert_eq!(item.confirmation().item_name(), "Sunset");
  assert_eq!(item.handle_click(corner(item.confirmation().confirm_area())), Some(Action::ExitConfirmMode));
  assert!(!item.is_confirmation_visible());
}

#[tokio::test]
async fn confirmed_delete_removes_the_item() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(DELETE).path("/video/42");
      then.status(200);
    })
    .await;
  let (mut item, mut rx) = sunset_against(&server).await;

  click_delete_then_confirm(&mut item).await;
  let settled = rx.recv().await.unwrap();
  assert_eq!(settled, Action::DeleteSettled(item.key(), DeleteOutcome::Deleted));

  let next = item.update(settled).await.unwrap();

  assert_eq!(next, Some(Action::RemoveItem(item.key())));
  assert!(!item.is_attached());
  mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn rejected_delete_leaves_the_item_with_an_error_label() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(DELETE).path("/video/42");
      then.status(500);
    })
    .await;
  let (mut item, mut rx) = sunset_against(&server).await;

  click_delete_then_confirm(&mut item).await;
  let settled = rx.recv().await.unwrap();
  item.update(settled).await.unwrap();

  assert!(item.is_attached());
  assert_eq!(item.confirmation().confirm_label(), ConfirmLabel::Error);
  mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn cancelled_confirmation_sends_nothing() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.method(DELETE);
      then.status(200);
    })
    .await;
  let (mut item, _rx) = sunset_against(&server).await;

  item.handle_click(corner(item.delete_trigger_area()));
  draw(&mut item);
  assert_eq!(item.handle_click(corner(item.confirmation().cancel_area())), Some(Action::ExitConfirmMode));

  assert!(item.is_attached());
  mock.assert_hits_async(0).await;
}
