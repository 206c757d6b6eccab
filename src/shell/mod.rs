//! Interactive menu over any line-based input and output.
//!
//! [`Shell`] reads answers from a `BufRead`, writes prompts and outcomes to a
//! `Write`, and drives a [`LibraryService`](crate::LibraryService). Every
//! prompt is re-asked until its validator accepts the answer. Reaching the
//! end of input ends the session without an error.

mod render;
mod session;

pub use session::Shell;
