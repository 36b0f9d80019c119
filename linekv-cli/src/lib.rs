//! Library half of the `linekv` binary: output templates and the
//! read-reduce-render loop.

pub mod app;
pub mod template;

pub use app::{run, Options, Outcome};
pub use template::{Template, TemplateError};
