//! set-rs: rules engine for the card game Set
//!
//! Goals:
//! - Exact rules: set detection, dealing and table replacement policy
//! - Compact, lossless state strings for storage and share links
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: play a move
//! ```
//! use set_rs::config::Settings;
//! use set_rs::game::Game;
//!
//! let mut game = Game::new(Settings::default().with_seed(42));
//! let set = game.sets()[0];
//! game.take_set(set).unwrap();
//!
//! let state = game.dump();
//! let (deck, table) = set_rs::codec::load(&state).unwrap();
//! assert_eq!(deck.len() + table.len(), 78);
//! ```
//!
//! ## Self-play
//! Run validated random games with:
//! ```sh
//! cargo run --bin set-rs -- --games 10
//! ```

pub mod agents;
pub mod cards;
pub mod codec;
pub mod config;
pub mod deck;
pub mod detector;
pub mod engine;
pub mod game;
pub mod selfplay;
pub mod session;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
