pub mod extract;
pub mod output;
pub mod progress;
