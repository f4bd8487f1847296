pub mod cli;
pub mod console;
pub mod error;
pub mod game;
pub mod github;
pub mod models;
pub mod search;
pub mod types;
