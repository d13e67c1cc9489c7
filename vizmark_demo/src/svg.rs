// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump utilities for `vizmark_demo`.

use kurbo::{Size, Vec2};
use peniko::Brush;
use vizmark_marks::StyledPath;

#[derive(Debug)]
struct Panel {
    offset: Vec2,
    paths: Vec<StyledPath>,
}

#[derive(Debug)]
pub(crate) struct SvgDocument {
    size: Size,
    panels: Vec<Panel>,
}

impl SvgDocument {
    pub(crate) fn new(size: Size) -> Self {
        Self {
            size,
            panels: Vec::new(),
        }
    }

    /// Adds a panel of paths drawn at `offset`.
    pub(crate) fn push_panel(&mut self, offset: Vec2, paths: Vec<StyledPath>) {
        self.panels.push(Panel { offset, paths });
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = self.size.width,
            h = self.size.height,
        ));
        out.push('\n');

        for panel in &self.panels {
            out.push_str(&format!(
                r#"<g transform="translate({} {})">"#,
                panel.offset.x, panel.offset.y
            ));
            out.push('\n');
            for p in &panel.paths {
                let d = p.path.to_svg();
                out.push_str(&format!(r#"  <path d="{d}""#));
                match &p.fill {
                    Some(fill) => write_paint_attr(&mut out, "fill", fill),
                    None => out.push_str(r#" fill="none""#),
                }
                if let Some(stroke) = &p.stroke {
                    write_paint_attr(&mut out, "stroke", &stroke.brush);
                    out.push_str(&format!(r#" stroke-width="{}""#, stroke.stroke_width));
                }
                out.push_str("/>\n");
            }
            out.push_str("</g>\n");
        }

        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::BezPath;
    use peniko::color::palette::css;
    use vizmark_marks::StrokeStyle;

    use super::*;

    #[test]
    fn writes_stroke_and_translated_group() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 5.0));
        let mut doc = SvgDocument::new(Size::new(20.0, 10.0));
        doc.push_panel(
            Vec2::new(1.0, 2.0),
            vec![StyledPath {
                path,
                stroke: Some(StrokeStyle::solid(css::RED, 2.0)),
                fill: None,
                points: 2,
            }],
        );
        let svg = doc.to_svg_string();
        assert!(svg.contains(r#"<g transform="translate(1 2)">"#));
        assert!(svg.contains(r##"stroke="#ff0000""##));
        assert!(svg.contains(r#"stroke-width="2""#));
        assert!(svg.contains(r#"fill="none""#));
    }
}
