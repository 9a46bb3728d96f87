//! Common infrastructure shared by the manifest front end and the emitters

mod error;
mod span;

pub use error::{DiagnosticReporter, PackError, PackResult};
pub use span::Span;
