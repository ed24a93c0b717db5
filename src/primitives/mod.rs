//! Primitives - Ready-made lifecycles.
//!
//! - [`flex_box`] - `Column` / `Row` containers (eager layout specs)
//! - [`text`] - measured text leaf (mount spec)
//! - [`responsive`] - row or column by available width (nested tree)
//!
//! Components of one kind share a single lifecycle instance, so two
//! `text("a")` calls build equivalent components and the previous pass's
//! measurement can be reused.

pub mod flex_box;
pub mod responsive;
pub mod text;

pub use flex_box::{FlexBox, column, column_with_style, row, row_with_style};
pub use responsive::{Responsive, responsive};
pub use text::{Text, text, text_with_style};
