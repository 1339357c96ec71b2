pub mod collector;
pub mod engine;
pub mod platform;
pub mod ranker;
pub mod rate;
pub mod snapshot;
pub mod source;
