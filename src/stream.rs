//! The module holds all logic to read and write pivot parts and their contents
pub mod pivot;
pub mod utils;
pub mod value;
