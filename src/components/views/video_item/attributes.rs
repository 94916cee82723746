use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Attributes a host can assign to a `VideoItem`, keyed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
pub enum Attribute {
  #[strum(serialize = "name")]
  Name,
  #[strum(serialize = "description")]
  Description,
  #[strum(serialize = "thumbnail")]
  Thumbnail,
  #[strum(serialize = "video-id")]
  VideoId,
  #[strum(serialize = "duration")]
  Duration,
}

/// Visible fields of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderField {
  Title,
  Description,
  ThumbnailSource,
  DurationBadge,
}

impl Attribute {
  /// `video-id` is observed but only feeds the play and delete targets.
  pub fn render_field(self) -> Option<RenderField> {
    match self {
      Attribute::Name => Some(RenderField::Title),
      Attribute::Description => Some(RenderField::Description),
      Attribute::Thumbnail => Some(RenderField::ThumbnailSource),
      Attribute::Duration => Some(RenderField::DurationBadge),
      Attribute::VideoId => None,
    }
  }
}

/// Last assigned value of every attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
  name: Option<String>,
  description: Option<String>,
  thumbnail: Option<String>,
  video_id: Option<String>,
  duration: Option<String>,
}

impl Attributes {
  fn slot(&mut self, attribute: Attribute) -> &mut Option<String> {
    match attribute {
      Attribute::Name => &mut self.name,
      Attribute::Description => &mut self.description,
      Attribute::Thumbnail => &mut self.thumbnail,
      Attribute::VideoId => &mut self.video_id,
      Attribute::Duration => &mut self.duration,
    }
  }

  pub fn get(&self, attribute: Attribute) -> Option<&str> {
    match attribute {
      Attribute::Name => self.name.as_deref(),
      Attribute::Description => self.description.as_deref(),
      Attribute::Thumbnail => self.thumbnail.as_deref(),
      Attribute::VideoId => self.video_id.as_deref(),
      Attribute::Duration => self.duration.as_deref(),
    }
  }

  /// Stores `value`, returning whether it differs from what was there.
  pub fn set(&mut self, attribute: Attribute, value: &str) -> bool {
    let slot = self.slot(attribute);
    if slot.as_deref() == Some(value) {
      return false;
    }
    *slot = Some(value.to_string());
    true
  }
}
