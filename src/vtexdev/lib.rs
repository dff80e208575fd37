//! # vtex-dev Architecture
//!
//! vtex-dev drives a VTEX IO project's development loop through two external
//! tools: a container runtime (`docker`) and the platform CLI (`vtex`). It owns
//! no build or deploy logic of its own. What it does own is the decision of
//! *which* invocations to make, in *what* order, and what to report when one
//! of them fails.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, loads config and session               │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  CommandRequest
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Orchestrator (api.rs)                                      │
//! │  - Validates options, builds the plan, runs it in order     │
//! │  - Returns Summary or the first failure                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  ResolvedOptions + PlanContext
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One pure `plan()` per command                            │
//! │  - Produces a Plan of Step descriptors; no I/O              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  Step
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Executor Layer (executor/)                                 │
//! │  - StepExecutor trait                                       │
//! │  - ProcessExecutor (production), FakeExecutor (testing)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: assert on the exact step list each option combination
//!    produces. Plans are plain data, so this needs no mocks at all.
//! 2. **Orchestrator**: drive plans through `FakeExecutor` to check ordering,
//!    halting on failure, preflight and deadlines.
//! 3. **CLI**: `tests/` runs the binary with stand-in tools on `PATH`.
//!
//! ## Module Overview
//!
//! - [`api`]: The orchestrator, entry point for all commands
//! - [`request`]: Command identifiers, option tables and validation
//! - [`plan`]: Step descriptors and the immutable `Plan`
//! - [`commands`]: Plan construction for each command
//! - [`executor`]: Running steps for real or under test
//! - [`config`]: Per-project configuration
//! - [`session`]: Account/workspace remembered between runs
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod plan;
pub mod request;
pub mod session;
