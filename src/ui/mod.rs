//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI browses a finished run; it never executes anything itself.
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, playback
//! - **[`panes`]**: stateless render functions for the source pane, the
//!   variables pane and the status bar
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! Construct an [`App`] from a recorded [`History`](crate::snapshot::History)
//! and call [`App::run`](app::App::run) to start the event loop.

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
