use ratatui::style::{Color, Modifier, Style};

// Palette shared by the card and its confirmation panel. Nothing outside this
// module styles a `VideoItem`.

pub const CARD_BG: Color = Color::Rgb(0x1a, 0x1a, 0x1a);
pub const PANEL_BG: Color = Color::Rgb(0x26, 0x26, 0x26);
pub const MUTED: Color = Color::Rgb(0xa0, 0xa0, 0xa0);
pub const NEUTRAL_BUTTON: Color = Color::Rgb(0x30, 0x30, 0x30);
pub const DANGER: Color = Color::Rgb(0xff, 0x44, 0x44);
pub const BADGE_BG: Color = Color::Rgb(0x10, 0x10, 0x10);

pub fn card(selected: bool) -> Style {
  let style = Style::default().bg(CARD_BG).fg(Color::White);
  if selected { style.add_modifier(Modifier::BOLD) } else { style }
}

pub fn card_border(selected: bool) -> Style {
  if selected { Style::default().fg(Color::White) } else { Style::default().fg(NEUTRAL_BUTTON) }
}

pub fn title() -> Style {
  Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

pub fn description() -> Style {
  Style::default().fg(MUTED)
}

pub fn thumbnail() -> Style {
  Style::default().fg(MUTED).add_modifier(Modifier::DIM)
}

pub fn play_glyph() -> Style {
  Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

pub fn duration_badge() -> Style {
  Style::default().bg(BADGE_BG).fg(Color::White)
}

pub fn delete_trigger() -> Style {
  Style::default().bg(NEUTRAL_BUTTON).fg(Color::White)
}

pub fn scrim() -> Style {
  Style::default().add_modifier(Modifier::DIM)
}

pub fn panel() -> Style {
  Style::default().bg(PANEL_BG).fg(Color::White)
}

pub fn cancel_button() -> Style {
  Style::default().bg(NEUTRAL_BUTTON).fg(Color::White)
}

pub fn confirm_button() -> Style {
  Style::default().bg(DANGER).fg(Color::White).add_modifier(Modifier::BOLD)
}
