pub mod http_video_api;
pub mod mock_video_api;
pub mod types;

pub use http_video_api::HttpVideoApi;
pub use mock_video_api::MockVideoApi;
pub use types::VideoApi;
