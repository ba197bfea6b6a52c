//! Error types for card rendering.

use thiserror::Error;

/// Convenient result type for the card crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while rendering or saving a card.
///
/// These are local to the card collaborator; a failed render never
/// touches engine state.
#[derive(Debug, Error)]
pub enum Error {
    /// No usable font could be loaded.
    #[error("font error: {0}")]
    Font(String),

    /// Image decode, encode, or save failure.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
