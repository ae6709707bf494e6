//! # Vocadrill Architecture
//!
//! Vocadrill is a **UI-agnostic vocabulary-learning library**: quiz progress
//! bookkeeping, custom vocabulary management, and portable data
//! import/export over a local key-value store. The CLI in `main.rs` is just
//! one client of it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, runs quiz sessions, formats output     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade owning the store and the three managers      │
//! │  - Dispatches to the owning manager, returns snapshots      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Managers (progress.rs, vocabulary.rs, coordinator.rs)      │
//! │  - Pure bookkeeping over plain records                      │
//! │  - Each owns a disjoint slice of the persisted store        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract KeyValueStore trait                             │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns regular
//! Rust types, never writes to stdout/stderr, and never exits the process.
//! User-facing failures come back as structured outcome values, not panics:
//! the app must stay usable after any failure.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade — entry point for all operations
//! - [`catalog`]: The built-in, read-only base vocabulary
//! - [`progress`]: Per-word mastery state and aggregate statistics
//! - [`vocabulary`]: User-authored words, CRUD and import/export
//! - [`coordinator`]: Settings plus whole-app export/import/backup
//! - [`autosave`]: The repeating background persist timer
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types
//! - [`error`]: Error types

pub mod api;
pub mod autosave;
pub mod catalog;
pub mod coordinator;
pub mod error;
pub mod model;
pub mod progress;
pub mod store;
pub mod vocabulary;
