//! # Competency Lens
//!
//! Browse a CSV catalog of competency standards by lens, with deep links and
//! back/forward history.
//!
//! Competency Lens loads a spreadsheet of standards (one row per standard,
//! flagged active or not), groups them into lenses by category, and lets a
//! user narrow the catalog to one lens and open a single standard in detail.
//! Every selection has a hash locator (`#/<lens>/<id>/`) so it can be linked
//! to, and user-driven selections are pushed onto a history stack so back and
//! forward restore them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌────────────┐
//! │ Row source  │──▶│ Entity       │──▶│ Repository │
//! │ HTTP / file │   │ builder      │   │ std + lens │
//! └─────────────┘   └──────────────┘   └─────┬──────┘
//!                                            │
//!         ┌──────────────┐   ┌───────────────┤
//!         │ History host │◀─▶│ StandardView  │──▶ Renderer
//!         │ hash + stack │   │ state machine │    (text / JSON)
//!         └──────────────┘   └───────────────┘
//! ```
//!
//! ## Data Flow
//!
//! 1. A **row source** ([`source`]) fetches the CSV once and yields rows.
//! 2. The **entity builder** keeps active rows, numbers them `1..N`, and
//!    registers one lens per distinct category.
//! 3. The **view** ([`view`]) decodes the current hash into an initial
//!    selection and renders it.
//! 4. Lens and standard clicks run state transitions, push history, and
//!    re-render; back/forward replay pushed state without pushing again.
//!
//! The models, repository, locator codec, and state machine live in the
//! WASM-safe `competency-lens-core` crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`source`] | CSV row sources (HTTP, file) |
//! | [`ingest`] | Fetch rows and build the catalog |
//! | [`view`] | Event handling, history, rendering glue |
//! | [`render`] | Text and JSON renderers |
//! | [`browse`] | `show` and interactive `browse` commands |

pub mod browse;
pub mod config;
pub mod ingest;
pub mod render;
pub mod source;
pub mod view;
