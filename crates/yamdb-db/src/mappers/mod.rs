//! Model to entity mappers
//!
//! Conversions from database rows (`models`) to domain entities (`yamdb-core`).

mod catalog;
mod publication;
mod title;
mod user;

pub use title::assemble_titles;
