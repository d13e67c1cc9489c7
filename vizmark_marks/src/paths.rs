// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assembly of line scenes into drawable paths.
//!
//! This is the hand-off point to a drawing backend: each [`StyledPath`] is one draw
//! call, with geometry as a [`kurbo::BezPath`] and paint as [`peniko::Brush`]es.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::BezPath;
use peniko::Brush;
use vizmark_core::{Scene, SceneInstance, Value};

use crate::line::{FILL_STYLE, LINE_WIDTH, SEGMENTED, STROKE_STYLE};

/// A paint + width pair for stroked paths.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

/// One draw call: a path with its stroke and fill.
#[derive(Clone, Debug)]
pub struct StyledPath {
    /// Geometry in parent coordinates.
    pub path: BezPath,
    /// Stroke, if the stroke color is non-null and the width positive.
    pub stroke: Option<StrokeStyle>,
    /// Fill, if the fill color is non-null. Open subpaths are filled as if closed.
    pub fill: Option<Brush>,
    /// Number of scene instances (points) the path passes through.
    pub points: usize,
}

impl StyledPath {
    fn styled_by(s: &SceneInstance) -> Self {
        let stroke_width = s.get(LINE_WIDTH).and_then(Value::as_f64).unwrap_or(0.0);
        let stroke = s
            .get(STROKE_STYLE)
            .and_then(Value::as_color)
            .filter(|_| stroke_width > 0.0)
            .map(|c| StrokeStyle::solid(c, stroke_width));
        let fill = s
            .get(FILL_STYLE)
            .and_then(Value::as_color)
            .map(Brush::Solid);
        Self {
            path: BezPath::new(),
            stroke,
            fill,
            points: 0,
        }
    }
}

/// Converts a line scene into paths.
///
/// A non-segmented line yields one path through every visible point, styled by the
/// first visible point; invisible points split it into subpaths. A segmented line yields
/// one path per pair of consecutive visible points, styled by the pair's first point.
pub fn line_paths(scene: &Scene) -> Vec<StyledPath> {
    if scene.fixed.flag(SEGMENTED) {
        return segment_paths(scene);
    }

    let Some(first) = scene.visible().next() else {
        return Vec::new();
    };
    let mut out = StyledPath::styled_by(first);
    let mut pen_down = false;
    for s in &scene.instances {
        if !s.visible {
            pen_down = false;
            continue;
        }
        if pen_down {
            out.path.line_to(s.point());
        } else {
            out.path.move_to(s.point());
            pen_down = true;
        }
        out.points += 1;
    }
    alloc::vec![out]
}

fn segment_paths(scene: &Scene) -> Vec<StyledPath> {
    scene
        .instances
        .windows(2)
        .filter(|pair| pair[0].visible && pair[1].visible)
        .map(|pair| {
            let mut seg = StyledPath::styled_by(&pair[0]);
            seg.path.move_to(pair[0].point());
            seg.path.line_to(pair[1].point());
            seg.points = 2;
            seg
        })
        .collect()
}
