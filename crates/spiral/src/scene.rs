use serde::{Deserialize, Serialize};

use crate::curve::{Point3, SpiralCurve};
use crate::group::{DateGroup, group_by_consecutive_date};
use crate::layout::{PositionMode, compute_positions};
use crate::milestone::Milestone;

/// Scene-level knobs on top of the helix constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneOptions {
    pub curve: SpiralCurve,
    /// Vertical distance between a group's anchor point and its label.
    pub label_offset: f64,
    /// Segments used to sample the helix path.
    pub path_segments: usize,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            curve: SpiralCurve::default(),
            label_offset: 0.5,
            path_segments: 100,
        }
    }
}

/// Where a date group's label goes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelAnchor {
    pub date: String,
    pub text: String,
    pub indices: Vec<usize>,
    /// Spiral point of the group's first member.
    pub anchor: Point3,
    /// `anchor` raised by the label offset.
    pub position: Point3,
}

impl LabelAnchor {
    fn from_group(group: DateGroup, points: &[Point3], label_offset: f64) -> Option<Self> {
        let anchor = *points.get(group.first_index()?)?;
        Some(Self {
            text: group.label(),
            date: group.date,
            indices: group.indices,
            anchor,
            position: anchor.raised(label_offset),
        })
    }

    /// Whether this label is emphasized when the pointer is over `hovered`.
    pub fn is_highlighted(&self, hovered: Option<usize>) -> bool {
        hovered.is_some_and(|i| self.indices.contains(&i))
    }
}

/// Everything a renderer needs to draw one timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpiralScene {
    pub mode: PositionMode,
    pub t_values: Vec<f64>,
    /// One point per milestone, in input order.
    pub points: Vec<Point3>,
    pub labels: Vec<LabelAnchor>,
    /// Dense samples of the whole helix.
    pub path: Vec<Point3>,
}

impl SpiralScene {
    pub fn build(milestones: &[Milestone], options: &SceneOptions) -> Self {
        let positions = compute_positions(milestones);
        let points: Vec<Point3> = positions
            .t_values
            .iter()
            .map(|&t| options.curve.point(t))
            .collect();
        let labels = group_by_consecutive_date(milestones)
            .into_iter()
            .filter_map(|group| LabelAnchor::from_group(group, &points, options.label_offset))
            .collect();

        Self {
            mode: positions.mode,
            t_values: positions.t_values,
            points,
            labels,
            path: options.curve.sample(options.path_segments),
        }
    }

    /// The label that owns milestone `index`.
    pub fn label_for_index(&self, index: usize) -> Option<&LabelAnchor> {
        self.labels.iter().find(|label| label.indices.contains(&index))
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
