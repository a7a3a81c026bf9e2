//! Static SVG rendering of a [`SpiralScene`].
//!
//! The scene is rotated by yaw (around the vertical axis) then pitch (around
//! the horizontal axis) and projected orthographically onto the screen plane.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::curve::Point3;
use crate::scene::{LabelAnchor, SpiralScene};

const RENDER_STYLES: &str = r#"
.wins-canvas { background: #000000; }
.wins-path { fill: none; stroke: #888888; stroke-opacity: 0.38; stroke-linejoin: round; }
.wins-marker { fill: #fffbe6; stroke: #ffae42; stroke-width: 2px; }
.wins-label text {
  fill: #ffffff;
  font-family: "Space Grotesk", sans-serif;
  font-size: 9px;
  text-anchor: middle;
  white-space: pre;
}
.wins-label .wins-date { font-weight: 400; }
.wins-label .wins-desc { font-weight: 300; }
.wins-label.wins-highlighted text { font-size: 18px; }
.wins-label.wins-highlighted .wins-date { font-weight: 700; }
.wins-label.wins-highlighted .wins-desc { font-weight: 400; }
"#;

const MARGIN: f64 = 40.0;
const MARKER_RADIUS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SvgOptions {
    /// Rotation around the vertical axis, in degrees.
    pub yaw_degrees: f64,
    /// Rotation around the horizontal screen axis, in degrees.
    pub pitch_degrees: f64,
    /// Pixels per scene unit.
    pub scale: f64,
    /// Milestone index under the pointer; its label is emphasized.
    pub highlight: Option<usize>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            yaw_degrees: 0.0,
            pitch_degrees: 15.0,
            scale: 40.0,
            highlight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Projection {
    sin_yaw: f64,
    cos_yaw: f64,
    sin_pitch: f64,
    cos_pitch: f64,
    scale: f64,
}

impl Projection {
    fn new(options: &SvgOptions) -> Self {
        let yaw = options.yaw_degrees.to_radians();
        let pitch = options.pitch_degrees.to_radians();
        Self {
            sin_yaw: yaw.sin(),
            cos_yaw: yaw.cos(),
            sin_pitch: pitch.sin(),
            cos_pitch: pitch.cos(),
            scale: options.scale,
        }
    }

    /// Screen coordinates (y down).
    fn project(&self, p: Point3) -> (f64, f64) {
        let x = p.x * self.cos_yaw + p.z * self.sin_yaw;
        let z = -p.x * self.sin_yaw + p.z * self.cos_yaw;
        let y = p.y * self.cos_pitch - z * self.sin_pitch;
        (x * self.scale, -y * self.scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            left: f64::INFINITY,
            top: f64::INFINITY,
            right: f64::NEG_INFINITY,
            bottom: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, (x, y): (f64, f64)) {
        self.left = self.left.min(x);
        self.top = self.top.min(y);
        self.right = self.right.max(x);
        self.bottom = self.bottom.max(y);
    }

    fn is_empty(&self) -> bool {
        self.left > self.right
    }
}

/// Escape text content for XML (inside elements)
pub fn escape_xml_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Format a coordinate with at most three decimals and no trailing zeros.
fn fmt_num(n: f64) -> String {
    let s = format!("{n:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn render_label(out: &mut String, label: &LabelAnchor, (x, y): (f64, f64), highlighted: bool) {
    let class = if highlighted {
        "wins-label wins-highlighted"
    } else {
        "wins-label"
    };
    let _ = write!(
        out,
        "<g class=\"{class}\"><text x=\"{}\" y=\"{}\"><tspan class=\"wins-date\">{}</tspan>",
        fmt_num(x),
        fmt_num(y),
        escape_xml_text(&label.date)
    );
    for line in label.text.lines() {
        let _ = write!(
            out,
            "<tspan class=\"wins-desc\" x=\"{}\" dy=\"1.2em\">{}</tspan>",
            fmt_num(x),
            escape_xml_text(line)
        );
    }
    out.push_str("</text></g>");
}

pub fn render_svg(scene: &SpiralScene, options: &SvgOptions) -> String {
    let projection = Projection::new(options);
    let path: Vec<(f64, f64)> = scene.path.iter().map(|&p| projection.project(p)).collect();
    let markers: Vec<(f64, f64)> = scene.points.iter().map(|&p| projection.project(p)).collect();
    let labels: Vec<(f64, f64)> = scene
        .labels
        .iter()
        .map(|label| projection.project(label.position))
        .collect();

    let mut bounds = Bounds::empty();
    for &p in path.iter().chain(&markers).chain(&labels) {
        bounds.include(p);
    }
    let (left, top, width, height) = if bounds.is_empty() {
        (0.0, 0.0, 100.0, 100.0)
    } else {
        (
            (bounds.left - MARGIN).floor(),
            (bounds.top - MARGIN).floor(),
            (bounds.right - bounds.left + 2.0 * MARGIN).ceil(),
            (bounds.bottom - bounds.top + 2.0 * MARGIN).ceil(),
        )
    };

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"{} {} {w} {h}\" class=\"wins-canvas\">",
        fmt_num(left),
        fmt_num(top),
        w = fmt_num(width),
        h = fmt_num(height),
    );
    svg.push_str("<style>");
    svg.push_str(RENDER_STYLES);
    svg.push_str("</style>");
    let _ = write!(
        svg,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#000000\"/>",
        fmt_num(left),
        fmt_num(top),
        fmt_num(width),
        fmt_num(height)
    );

    if !path.is_empty() {
        svg.push_str("<polyline class=\"wins-path\" points=\"");
        let coords: Vec<String> = path
            .iter()
            .map(|&(x, y)| format!("{},{}", fmt_num(x), fmt_num(y)))
            .collect();
        svg.push_str(&coords.join(" "));
        svg.push_str("\"/>");
    }

    for &(x, y) in &markers {
        let _ = write!(
            svg,
            "<circle class=\"wins-marker\" cx=\"{}\" cy=\"{}\" r=\"{}\"/>",
            fmt_num(x),
            fmt_num(y),
            fmt_num(MARKER_RADIUS)
        );
    }

    // Highlighted label last so it draws on top.
    let mut highlighted = None;
    for (label, &pos) in scene.labels.iter().zip(&labels) {
        if label.is_highlighted(options.highlight) {
            highlighted = Some((label, pos));
            continue;
        }
        render_label(&mut svg, label, pos, false);
    }
    if let Some((label, pos)) = highlighted {
        render_label(&mut svg, label, pos, true);
    }

    svg.push_str("</svg>");
    svg
}
