//! Core services shared by the session, the statistics engine and the CLI
//!
//! - `cache`: the team identity cache (CachedTeamMap)
//! - `batch`: debounced batch fetching of uncached team ids
//! - `directory`: cache + batcher behind one injected handle
//! - `config`: gateway configuration and access-key resolution
//! - `http`: request header helpers

pub mod batch;
pub mod cache;
pub mod config;
pub mod directory;
pub mod http;

pub use batch::BatchCoordinator;
pub use cache::{CachedTeamMap, TeamCache};
pub use config::{resolve_access_key, GatewayConfig};
pub use directory::{fallback_name, TeamDirectory};
pub use http::{access_key_header_map, ACCESS_KEY_HEADER};
