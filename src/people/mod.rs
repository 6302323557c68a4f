//! Person domain: the declared schema catalog and the known-person
//! directory

mod catalog;
mod directory;

pub use catalog::{hair_color, Catalog};
pub use directory::Directory;
