//! Input file handling

pub mod file_reader;

pub use file_reader::FileReader;
