//! Chronological spiral layout for dated milestones.
//!
//! Maps a sequence of `{date, desc}` milestones onto a 3D helix:
//! - `MM.DD` dates become a day-of-year against a leap reference year
//! - day-of-year values are normalized to a `t` in `[0, 1]` (chronological
//!   mode), or milestones are spaced evenly when any date is unusable
//!   (uniform mode)
//! - `t` is projected onto the helix
//! - consecutive milestones with the same date share one label
//!
//! # Example
//!
//! ```
//! use spiral::{Milestone, PositionMode, SceneOptions, SpiralScene};
//!
//! let milestones = vec![
//!     Milestone::new("01.01", "New Year").unwrap(),
//!     Milestone::new("12.31", "Year End").unwrap(),
//! ];
//! let scene = SpiralScene::build(&milestones, &SceneOptions::default());
//! assert_eq!(scene.mode, PositionMode::Chronological);
//! assert_eq!(scene.points.len(), 2);
//! ```

mod curve;
mod date;
mod group;
mod layout;
mod milestone;
mod scene;
pub mod svg;

pub use curve::*;
pub use date::*;
pub use group::*;
pub use layout::*;
pub use milestone::*;
pub use scene::*;
