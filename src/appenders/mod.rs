//! Sink implementations

pub mod console;
pub mod dual_stream;
pub mod file;
pub mod rotating_file;

pub use console::ConsoleSink;
pub use dual_stream::{DualStreamWriter, Stream};
pub use file::{FileSink, FileSinkBuilder};
pub use rotating_file::RotatingFile;
