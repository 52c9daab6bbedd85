//! Text reconstruction from positioned PDF fragments.
//!
//! PDF backends hand over text as loosely ordered runs, each tagged with a
//! baseline. [`LineReconstructor`] turns those runs into readable lines.
//!
//! # Example
//!
//! ```rust
//! use pagetext::content::{reconstruct, PositionedFragment};
//!
//! let fragments = vec![
//!     PositionedFragment::new("Hello", 100.0),
//!     PositionedFragment::new(" World", 100.0),
//!     PositionedFragment::new("Next", 200.0),
//! ];
//! assert_eq!(reconstruct(&fragments), "Hello World\nNext");
//! ```

pub mod lines;
pub mod types;

pub use lines::{normalize_line, reconstruct, LineReconstructor, DEFAULT_LINE_TOLERANCE};
pub use types::{is_text_whitespace, PositionedFragment};
