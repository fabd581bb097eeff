//! Line-oriented text buffer.
//!
//! Content is a flat, randomly indexable sequence of [`Line`]s holding raw
//! bytes (no Unicode segmentation: one byte is one logical column). Each line
//! carries a tab-expanded `rendered` copy used for display and column math, and
//! one highlight class per rendered byte.
//!
//! Every mutation flows through [`Buffer`], which keeps line indices dense,
//! regenerates the rendered form of touched lines, and propagates block-comment
//! carry state down the buffer until it stabilizes. Propagation is an explicit
//! loop bounded by the line count, not recursion.

mod buffer;
mod line;
pub mod render;

pub use buffer::Buffer;
pub use core_syntax::Highlight;
pub use line::Line;
pub use render::DEFAULT_TAB_STOP;
