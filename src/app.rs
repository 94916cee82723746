use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::{
  action::Action,
  api::{HttpVideoApi, VideoApi},
  components::{AsyncComponent, Gallery},
  config::Config,
  mode::Mode,
  tui,
  tui::Tui,
};

pub struct App {
  pub gallery: Box<dyn AsyncComponent>,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub mode: Mode,
  pub tick_rate: f64,
  pub frame_rate: f64,
}

impl App {
  pub fn new(config: &Config, tick_rate: f64, frame_rate: f64) -> Result<Self> {
    let api: Arc<dyn VideoApi> = Arc::new(HttpVideoApi::new(config.api_url.clone())?);
    info!("Mounting {} videos against {}", config.videos.len(), api.base_url());
    let gallery = Box::new(Gallery::new(api, &config.videos));
    Ok(Self { gallery, should_quit: false, should_suspend: false, mode: Mode::Browse, tick_rate, frame_rate })
  }

  fn global_action(&self, key: KeyEvent) -> Option<Action> {
    match key {
      KeyEvent { code: KeyCode::Char('c' | 'C'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Quit),
      KeyEvent { code: KeyCode::Char('z' | 'Z'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Suspend),
      KeyEvent { code: KeyCode::Char('q'), .. } if self.mode == Mode::Browse => Some(Action::Quit),
      _ => None,
    }
  }

  fn navigate(url: &str) {
    if let Err(e) = open::that_detached(url) {
      error!("Failed to open {}: {}", url, e);
    }
  }

  fn new_tui(&self) -> Result<Tui> {
    Ok(Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate).mouse(true))
  }

  pub async fn run(&mut self) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let mut tui = self.new_tui()?;
    tui.enter()?;

    self.gallery.register_action_handler(action_tx.clone())?;

    loop {
      if let Some(e) = tui.next().await {
        match e {
          tui::Event::Quit => action_tx.send(Action::Quit)?,
          tui::Event::Tick => action_tx.send(Action::Tick)?,
          tui::Event::Render => action_tx.send(Action::Render)?,
          tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
          tui::Event::Key(key) => {
            if let Some(action) = self.global_action(key) {
              action_tx.send(action)?;
            }
          },
          _ => {},
        }

        if let Some(action) = self.gallery.handle_events(Some(e.clone())).await? {
          action_tx.send(action)?;
        }
      }

      while let Ok(action) = action_rx.try_recv() {
        if action != Action::Tick && action != Action::Render {
          log::debug!("{action:?}");
        }

        match action {
          Action::EnterConfirmMode => self.mode = Mode::Confirm,
          Action::ExitConfirmMode => self.mode = Mode::Browse,
          Action::Navigate(ref url) => Self::navigate(url),
          Action::Error(ref message) => error!("{}", message),
          Action::Quit => self.should_quit = true,
          Action::Suspend => self.should_suspend = true,
          Action::Resume => self.should_suspend = false,
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            self.render(&mut tui, &action_tx)?;
          },
          Action::Render => self.render(&mut tui, &action_tx)?,
          _ => {},
        }
        if let Some(action) = self.gallery.update(action.clone()).await? {
          action_tx.send(action)?
        };
      }
      if self.should_suspend {
        tui.suspend()?;
        action_tx.send(Action::Resume)?;
        tui = self.new_tui()?;
        tui.enter()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }

  fn render(&mut self, tui: &mut Tui, action_tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
    tui.draw(|f| {
      let area = f.area();
      if let Err(e) = self.gallery.draw(f, area) {
        report_draw_error(action_tx, &e);
      }
    })?;
    Ok(())
  }
}

/// Returns whether the error reached the action loop. A closed channel is only logged.
fn report_draw_error(action_tx: &mpsc::UnboundedSender<Action>, err: &color_eyre::Report) -> bool {
  match action_tx.send(Action::Error(format!("Failed to draw: {:?}", err))) {
    Ok(()) => true,
    Err(e) => {
      error!("Failed to send action: {}", e);
      false
    },
  }
}

#[cfg(test)]
mod tests {
  use color_eyre::eyre::eyre;

  use super::*;

  #[test]
  fn test_draw_error_is_forwarded() {
    let (tx, mut rx) = mpsc::unbounded_channel();

    assert!(report_draw_error(&tx, &eyre!("boom")));
    assert!(matches!(rx.try_recv(), Ok(Action::Error(message)) if message.contains("boom")));
  }

  #[test]
  fn test_draw_error_with_closed_channel_is_logged() {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);

    assert!(!report_draw_error(&tx, &eyre!("boom")));
  }
}
