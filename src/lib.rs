pub mod board;
pub mod category;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod normalize;
pub mod payload;
pub mod render;

pub use board::SnippetBoard;
pub use category::Section;
pub use error::{FetchError, Result, SnippetError};
pub use fetcher::{Fetch, FetchOutcome, Fetched, ResilientFetcher};
pub use normalize::NormalizedItem;
pub use payload::{Payload, Via};
