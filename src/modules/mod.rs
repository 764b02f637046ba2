pub mod components;
pub mod prompt;
