//! Task scheduling & interaction engine for a personal calendar app.
//!
//! Colored folders group dated tasks; recurring definitions are
//! materialized up front into concrete instances sharing a series id;
//! incomplete tasks from past days carry forward onto "today" until
//! completed; and a per-row swipe state machine drives the edit/delete
//! reveal panel. All state persists through a string-keyed JSON blob
//! store, injected so the engine runs against an in-memory fake in tests.

pub mod engine;
pub mod io;
pub mod model;
pub mod ops;
pub mod swipe;
pub mod util;
