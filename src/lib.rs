//! Rugby club management companion library
//!
//! Reads a club's roster, fixtures, standings and training data from the
//! game's read-only API and turns them into sorted, exportable tables.
//!
//! ## Features
//!
//! - **Team Directory**: cached team identities with debounced batch lookups
//! - **Roster Session**: every data slice for the selected club, loaded in
//!   parallel and guarded against late responses
//! - **Derived Statistics**: player ratings, squad averages, field sorting,
//!   fixture results, office overview and stadium sizing
//! - **Export**: `.xlsx` workbooks that mirror the sorted views
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use brtools::{
//!     core::{GatewayConfig, TeamDirectory},
//!     gateway::HttpGateway,
//!     session::RosterSession,
//!     stats::{sorted_players, PlayerField, SortState},
//!     AccessKey, TeamId,
//! };
//!
//! # async fn example() -> brtools::Result<()> {
//! let config = GatewayConfig::from_env()?;
//! let gateway = Arc::new(HttpGateway::new(&config)?);
//! let directory = TeamDirectory::new(gateway.clone(), &config);
//! let session = RosterSession::new(gateway, directory);
//!
//! session.set_access_key(Some(AccessKey::new("my-key"))).await;
//! session.select_and_load(TeamId::new(1234)).await;
//!
//! let snapshot = session.snapshot();
//! let mut sort = SortState::<PlayerField>::default();
//! sort.select(PlayerField::Rating);
//! for player in sorted_players(snapshot.players.items(), &sort) {
//!     println!("{} {}", player.fname, player.lname);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export BRTOOLS_ACCESS_KEY=...      # access key for every command
//! export BRTOOLS_TEAM_ID=1234        # default club
//! export BRTOOLS_API_BASE_URL=...    # alternate gateway
//! export BRTOOLS_COALESCING_MS=300   # team lookup batching window
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod export;
pub mod gateway;
pub mod session;
pub mod stats;

// Re-export commonly used types
pub use cli::types::{AccessKey, FixtureId, LeagueId, PlayerId, TeamId};
pub use error::{BrError, Result};
pub use gateway::{Fixture, Player, Standing, Team};
