//! Todo Repository Implementations

pub mod json_file;

pub use json_file::JsonFileTodoRepository;
