// Reusable library API — the CLI in main.rs is a thin wrapper over this.
pub mod consistency;
pub mod errors;
pub mod grid;
pub mod log;
pub mod render;
pub mod search;
pub mod solver;
pub mod word_list;
