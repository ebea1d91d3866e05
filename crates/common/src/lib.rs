//! Common utilities and shared types for atelier.
//!
//! This crate provides foundational components used across all atelier crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Wallet stubs**: Placeholder wallet addresses and the simulated badge mint
//!
//! # Example
//!
//! ```no_run
//! use atelier_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod wallet;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use wallet::{SimulatedMint, generate_wallet_address, simulate_badge_mint};
