// Library exports for the Othello engine
// The HTTP server, the replay tool and the arena all build on these modules

pub mod arena;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod replay;
pub mod rules;
pub mod search;
pub mod types;
