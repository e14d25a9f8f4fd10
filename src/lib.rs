//! **Peermap** is a live world-map dashboard core.
//!
//! It keeps per-country peer and port counters in sync with a polling
//! backend and drives a rendering surface with them.
//!
//! - [Counters](#counters)
//! - [Components](#components)
//! - [Configuration](#configuration)
//! - [Data endpoints](#data-endpoints)
//!
//! # Counters
//!
//! Every country, and the world as a whole, carries a pair of counters:
//! `awaitingPeers` and `usedPorts`. A third value, `all`, is always derived
//! as `awaitingPeers - usedPorts`. It is never accepted from the backend.
//!
//! # Components
//!
//! ```text
//! poller ──► merge ──► render adapter
//! user event ──► selection ──► merge ──► render adapter
//! ```
//!
//! - [`core::store`]: the bootstrap timeline and the aggregate world series.
//! - [`core::merge`]: in place merge of fresh snapshots into the bound view state.
//! - [`core`]: the [`Dashboard`](core::Dashboard) controller handling user selections.
//! - [`core::render`]: the rendering surface.
//! - [`bootstrap::jobs::poller`]: the periodic refresh.
//!
//! # Configuration
//!
//! The configuration is loaded from `./share/default/config/peermap.toml` or
//! from the `PEERMAP_CONFIG_TOML` env var. Refer to the
//! [`peermap-configuration`](peermap_configuration) package for the options.
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [source]
//! base_url = "http://127.0.0.1:8443/"
//!
//! [poller]
//! interval_ms = 500
//!
//! [selection]
//! debounce_ms = 1000
//!
//! [bootstrap]
//! timeline_path = "./share/default/timeline.json"
//! ```
//!
//! # Data endpoints
//!
//! | Path               | Body                                             |
//! |--------------------|--------------------------------------------------|
//! | `update_world_map` | `[{"id": "US", "awaitingPeers": 1, "usedPorts": 2}]` |
//! | `default_map_data` | `[{"date": "2024-05-01T00:00:00Z", "awaitingPeers": 1, "usedPorts": 2}]` |
//! | `current_totals`   | `{"awaitingPeers": 1, "usedPorts": 2}`            |
pub mod app;
pub mod bootstrap;
pub mod client;
pub mod core;
pub mod signals;
