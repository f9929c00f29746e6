// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod fall;
pub mod game;
pub mod input;
pub mod phrase;
pub mod render;
pub mod runtime;
pub mod score;
pub mod word_bank;
