//! # Interaction layer
//!
//! `ripple-ui` drives widgets built on `ripple-core`:
//!
//! - [`events`]: keyboard focus and pointer routing ([`EventDispatcher`]).
//! - [`gestures`]: tap, double tap, long press, drag and fling recognition
//!   ([`GestureDispatcher`]).
//! - [`lazy`]: virtualized [`ListView`] and [`GridView`] with slot recycling.
//! - [`scroll`]: nested scroll chains and a clamped [`ScrollState`].
//!
//! A frame usually goes: lay out with [`ripple_core::compute`], build the
//! [`RenderNode`](ripple_core::RenderNode) tree, then feed each raw
//! [`InputEvent`](ripple_core::InputEvent) to both dispatchers. Timestamps
//! come from the caller; nothing here reads a clock.

pub mod events;
pub mod gestures;
pub mod lazy;
pub mod scroll;

pub use events::{Dispatch, EventDispatcher};
pub use gestures::{GestureConfig, GestureDispatcher, GesturePhase};
pub use lazy::{BindFn, GridStyle, GridView, ListStyle, ListView, Orientation, Slot};
pub use scroll::{ScrollChain, ScrollOutcome, ScrollParent, ScrollParentRef, ScrollState};

#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
