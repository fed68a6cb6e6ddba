pub mod error;
pub mod types;
pub mod utils;

pub use error::ExtractError;
pub use types::{DelegatedUrl, DelegationHints, MediaDescriptor, ResultType, VideoId};
