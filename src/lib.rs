//! Rasterform renders square pixel fields from user-supplied formulas.
//!
//! For every coordinate `(i, j)` of an N×N field, four small arithmetic/bitwise
//! expressions produce an intermediate value `x` and three color channels, each
//! channel post-processed by a selectable wrap/clamp rule. An [`AnimationClock`]
//! feeds the bounded time variable `t` to re-render the field on a fixed cadence.
#![forbid(unsafe_code)]

pub mod channel;
pub mod clock;
pub mod engine;
pub mod error;
pub mod expr;
pub mod field;
pub mod model;
pub mod presets;

pub use channel::{ChannelOp, ChannelOps};
pub use clock::AnimationClock;
pub use engine::Engine;
pub use error::{RasterformError, RasterformResult};
pub use expr::{Bindings, Formula, evaluate};
pub use field::{Pixel, PixelField, render_field, render_pixels};
pub use model::{CompiledFormulaSet, FieldSize, FormulaSet, RenderConfig};
pub use presets::{PRESETS, Preset};
