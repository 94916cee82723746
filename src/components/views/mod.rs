pub mod gallery;
pub mod video_item;

pub use gallery::Gallery;
pub use video_item::VideoItem;
