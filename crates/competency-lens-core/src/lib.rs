//! # Competency Lens Core
//!
//! Shared, WASM-safe logic for Competency Lens: data models, the entity
//! builder, the in-memory repository, the navigation codec, and the
//! selection state machine.
//!
//! This crate contains no tokio, HTTP, filesystem I/O, or other
//! native-only dependencies. It compiles to both native targets and
//! `wasm32-unknown-unknown`, where a `HistoryHost` can be backed by the
//! browser's `window.history`.

pub mod builder;
pub mod context;
pub mod locator;
pub mod models;
pub mod navigation;
pub mod repository;
pub mod slug;
pub mod state;
