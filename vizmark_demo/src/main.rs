// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line and layout demos for `vizmark_marks`, written to `vizmark_demo.svg`.

mod svg;

use std::f64::consts::TAU;

use kurbo::{Size, Vec2};
use peniko::color::palette::css;
use vizmark_core::{
    FixedValues, Mark, MarkError, Property, RenderContext, SceneInstance, Value, cast,
};
use vizmark_marks::{Arrange, Layout, LayoutType, Line, StyledPath};

const PANEL: Size = Size::new(400.0, 160.0);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut doc = svg::SvgDocument::new(Size::new(PANEL.width, PANEL.height * 3.0));
    doc.push_panel(Vec2::ZERO, series_demo()?);
    doc.push_panel(Vec2::new(0.0, PANEL.height), segmented_demo()?);
    doc.push_panel(Vec2::new(0.0, PANEL.height * 2.0), wheel_demo()?);

    std::fs::write("vizmark_demo.svg", doc.to_svg_string())?;
    println!("wrote vizmark_demo.svg");
    Ok(())
}

/// Three non-segmented series, colored by the theme's categorical palette.
fn series_demo() -> Result<Vec<StyledPath>, MarkError> {
    let mut out = Vec::new();
    for series in 0..3 {
        let phase = series as f64;
        let line = Line::new()
            .data((0..40).map(|i| f64::from(i) / 39.0))
            .left(Property::func(|cx| {
                Value::Number(20.0 + cx.datum().as_f64().unwrap_or(0.0) * 360.0)
            }))
            .top(Property::func(move |cx| {
                let t = cx.datum().as_f64().unwrap_or(0.0);
                Value::Number(80.0 - 50.0 * (t * TAU + phase).sin())
            }))
            .line_width(2.0);
        let cx = RenderContext::new(PANEL).with_series(series);
        out.extend(line.paths(&cx)?);
    }
    Ok(out)
}

/// A segmented line whose width and color follow the data.
fn segmented_demo() -> Result<Vec<StyledPath>, MarkError> {
    let values = [12.0, 40.0, 25.0, 90.0, 60.0, 110.0, 75.0, 130.0];
    let n = values.len() as f64;
    let line = Line::new()
        .data(values)
        .segmented(true)
        .left(Property::func(move |cx| {
            Value::Number(20.0 + 360.0 * cx.index() as f64 / (n - 1.0))
        }))
        .bottom(Property::func(|cx| cx.datum().clone()))
        .line_width(Property::func(|cx| {
            Value::Number(1.0 + cx.datum().as_f64().unwrap_or(0.0) / 20.0)
        }))
        .stroke_style(Property::func(|cx| {
            let value = cx.datum().as_f64().unwrap_or(0.0);
            let rising = cx
                .sibling()
                .and_then(|s| s.bottom)
                .is_none_or(|prev| prev <= value);
            Value::from(if rising { "seagreen" } else { "crimson" })
        }));
    line.paths(&RenderContext::new(PANEL))
}

/// Evenly spaces instances on a circle around the panel center.
#[derive(Debug)]
struct Wheel;

impl Arrange for Wheel {
    fn arrange(
        &self,
        fixed: &FixedValues,
        cx: &RenderContext,
        instances: &mut [SceneInstance],
    ) -> Result<(), MarkError> {
        let radius = fixed.number("radius").ok_or_else(|| MarkError::Arrange {
            layout: "wheel",
            reason: "radius is not set".to_string(),
        })?;
        let start = fixed.number("start_angle").unwrap_or(0.0);
        let n = instances.len().max(1) as f64;
        for s in instances.iter_mut().filter(|s| s.visible) {
            let a = start + TAU * s.index as f64 / n;
            s.left = Some(cx.size.width / 2.0 + radius * a.cos());
            s.top = Some(cx.size.height / 2.0 + radius * a.sin());
        }
        Ok(())
    }
}

/// A wheel layout, outlined by a closed, filled line through its positions.
fn wheel_demo() -> Result<Vec<StyledPath>, MarkError> {
    let wheel_type = LayoutType::new("wheel")
        .property("radius", cast::number)
        .property("start_angle", cast::number)
        .build();
    let wheel = Layout::new(&wheel_type)
        .data(["a", "b", "c", "d", "e", "f"])
        .with_arrange(Wheel)
        .try_with("radius", "60")?
        .try_with("start_angle", -TAU / 4.0)?;

    let cx = RenderContext::new(PANEL);
    let scene = wheel.render(&cx)?;
    let mut points: Vec<Value> = scene
        .visible()
        .map(|s| {
            let p = s.point();
            Value::from((p.x, p.y))
        })
        .collect();
    if let Some(first) = points.first().cloned() {
        points.push(first);
    }

    let outline = Line::new()
        .data(points)
        .left(Property::func(|cx| cx.datum().get(0).cloned().unwrap_or_default()))
        .top(Property::func(|cx| cx.datum().get(1).cloned().unwrap_or_default()))
        .stroke_style(css::STEEL_BLUE)
        .fill_style(css::STEEL_BLUE.with_alpha(0.2));
    outline.paths(&cx)
}
