pub mod components;
pub mod library;
pub mod title;
