//! Data models for Biblioteca

pub mod book;
pub mod library;
pub mod page;

// Re-export commonly used types
pub use book::{Book, BookInput, BookRow};
pub use library::{Library, LibraryInput, LibraryRow};
pub use page::{Page, PageParams, PageRequest};
