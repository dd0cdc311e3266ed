// Setup page error type

use thiserror::Error;

/// Errors raised while wiring a setup page to its markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupUiError {
    /// The page markup has no element with this id
    #[error("Element not found: #{0}")]
    MissingElement(String),

    /// A banner container without a `span` to hold the message
    #[error("Banner #{0} has no message slot")]
    MissingMessageSlot(String),

    /// The page URL could not be parsed
    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown setup page: {0}")]
    UnknownPage(String),

    /// A DOM call failed or the element has the wrong kind
    #[error("DOM error: {0}")]
    Dom(String),

    /// Element id layout is unusable
    #[error("Layout error: {0}")]
    Layout(String),
}

pub type Result<T> = std::result::Result<T, SetupUiError>;
