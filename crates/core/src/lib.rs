pub mod buffer;
pub mod error;
pub mod event;
pub mod sample;
pub mod session;

pub use buffer::{Metrics, RollingSampleBuffer};
pub use error::{FetchError, Result, WxError};
pub use event::Message;
pub use sample::Sample;
pub use session::Session;
