//! # Dockhand Architecture
//!
//! Dockhand is a **UI-agnostic app-lifecycle library** with a CLI client.
//! It installs, starts, stops and removes containerized apps on a home
//! server, delegating all actual container work to an external
//! orchestrator.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs + main.rs, binary only)                 │
//! │  - Parses arguments, prints messages, maps exit codes       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (raw names → validated AppIds)         │
//! │  - Loads seed material only where derivation happens        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per lifecycle operation                       │
//! │  - Operates on the store/runner seams, returns CmdResult    │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                           │
//!                  ▼                           ▼
//! ┌──────────────────────────────┐ ┌──────────────────────────────┐
//! │  Storage (store/)            │ │  Orchestrator (runner.rs)    │
//! │  - StateStore trait          │ │  - Runner trait              │
//! │  - FileStore / InMemoryStore │ │  - DockerCompose / fakes     │
//! └──────────────────────────────┘ └──────────────────────────────┘
//! ```
//!
//! ## Key Principle: Delegate, Don't Reimplement
//!
//! Everything non-trivial belongs to an external tool. The orchestrator
//! owns service startup, networking, health and restarts; tor owns hidden
//! service provisioning. This crate only assembles environments, tracks the
//! installed-set, and derives secrets deterministically from a master seed,
//! so nothing secret is ever persisted.
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never calls
//! `std::process::exit`, and never assumes a terminal.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): unit tests against `InMemoryStore`
//!    and a recording `Runner` fake. The lion's share of coverage.
//! 2. **Storage** (`store/`): filesystem tests with temp dirs, including
//!    concurrent-update serialization through the lock file.
//! 3. **CLI** (`tests/`): end-to-end runs of the binary against a temp
//!    platform root and a stub orchestrator script.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Lifecycle logic for each subcommand
//! - [`store`]: Installed-apps registry behind the `StateStore` trait
//! - [`runner`]: Orchestrator seam and docker-compose implementation
//! - [`environment`]: Environment assembly for orchestrated apps
//! - [`secrets`]: Master seed loading and keyed-hash derivation
//! - [`manifest`]: Declarative per-app requirements
//! - [`fanout`]: Bounded worker pool for the `installed` broadcast
//! - [`config`]: Platform root layout and settings
//! - [`model`]: Core data types (`AppId`, `Registry`)
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod fanout;
pub mod manifest;
pub mod model;
pub mod runner;
pub mod secrets;
pub mod store;
