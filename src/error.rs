//! Errors raised at the edges of the board: DOM setup and record loading.

use thiserror::Error;

/// Failures outside the pure graph core.
#[derive(Debug, Error)]
pub enum BoardError {
	/// No `window` global, e.g. when running outside a browser.
	#[error("browser window is not available")]
	NoWindow,
	/// The canvas node ref was not mounted yet.
	#[error("board canvas is not mounted")]
	NoCanvas,
	/// `getContext("2d")` failed or returned something else.
	#[error("2d rendering context unavailable: {0}")]
	NoContext(String),
	/// The record snapshot could not be parsed.
	#[error("invalid record snapshot: {0}")]
	Records(#[from] serde_json::Error),
}
