//! # Engine core
//!
//! `ripple-core` holds the pieces every other Ripple crate builds on:
//!
//! - [`geometry`]: `Vec2`, `Size`, `Rect`, `PaddingValues`.
//! - [`error`]: the shared [`Error`] taxonomy and its status codes.
//! - [`input`]: raw pointer/key/window events and synthesized gestures.
//! - [`widget`]: the [`Widget`] capability trait and flags.
//! - [`render`]: [`RenderNode`] trees and hit testing.
//! - [`layout`]: the flexbox solver.
//! - [`render_api`]: drawing and text capabilities widgets paint through.
//! - [`allocator`]: byte accounting for pooled storage.
//!
//! Everything is single-threaded: widgets are shared as
//! `Rc<RefCell<dyn Widget>>` and dispatchers hold `Weak` back-references.

pub mod allocator;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod render;
pub mod render_api;
pub mod semantics;
pub mod tests;
pub mod widget;

pub use allocator::*;
pub use error::{Error, Result};
pub use geometry::*;
pub use input::*;
pub use layout::*;
pub use render::*;
pub use render_api::*;
pub use semantics::*;
pub use widget::*;

/// Routes `log` output through `env_logger` once per test binary.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
