//! Collection-level operations used by the route handlers.

pub mod books;
pub mod borrowed_books;
pub mod categories;
