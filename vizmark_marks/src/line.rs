// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line mark.

extern crate alloc;

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use once_cell::race::OnceBox;
use vizmark_core::schema::{BOTTOM, LEFT, RIGHT, TOP, VISIBLE};
use vizmark_core::{
    BuildContext, Mark, MarkBase, MarkError, MarkType, Property, PropertyDef, RenderContext,
    SceneInstance, Value, cast, default_build_instance,
};

use crate::paths::{StyledPath, line_paths};

/// Stroke width in pixels. Defaults to `1.5`.
pub const LINE_WIDTH: &str = "line_width";
/// Stroke color. Defaults to the theme's categorical color for the series.
pub const STROKE_STYLE: &str = "stroke_style";
/// Fill color. Defaults to null (an open polyline).
pub const FILL_STYLE: &str = "fill_style";
/// Fixed flag: style each segment independently. Defaults to `false`.
pub const SEGMENTED: &str = "segmented";

static LINE_TYPE: OnceBox<Arc<MarkType>> = OnceBox::new();

/// The schema shared by every line mark.
pub fn line_type() -> Arc<MarkType> {
    Arc::clone(LINE_TYPE.get_or_init(|| Box::new(Arc::new(new_line_type()))))
}

fn new_line_type() -> MarkType {
    MarkType::new("line")
        .define(
            PropertyDef::new(LINE_WIDTH)
                .with_default(1.5)
                .with_cast(cast::number),
        )
        .define(
            PropertyDef::new(STROKE_STYLE)
                .with_default(Property::func(|cx| {
                    Value::Color(cx.theme().categorical(cx.series()))
                }))
                .with_cast(cast::color),
        )
        .define(PropertyDef::new(FILL_STYLE).with_cast(cast::color))
        .define(
            PropertyDef::fixed(SEGMENTED)
                .with_default(false)
                .with_cast(cast::boolean),
        )
}

/// A series of connected line segments, one articulation point per datum.
///
/// For `n` points, `n - 1` segments are drawn. Points are positioned with the box
/// model (`left`/`top`, or `right`/`bottom` against the parent size).
///
/// Unless [`Line::segmented`] is set, the whole polyline is drawn as one path with the
/// style of its first point, and style properties are only evaluated for that point.
#[derive(Clone, Debug)]
pub struct Line {
    base: MarkBase,
}

impl Line {
    /// Creates a line with default properties and a single null datum.
    pub fn new() -> Self {
        Self {
            base: MarkBase::new(line_type()),
        }
    }

    /// Sets the data, one point per item.
    pub fn data<I>(mut self, data: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.base.set_data(data);
        self
    }

    /// Inherits properties and data from another mark.
    pub fn extend(mut self, parent: &impl Mark) -> Self {
        self.base.extend(parent.base());
        self
    }

    /// Sets the left offset of each point.
    pub fn left(self, left: impl Into<Property>) -> Self {
        self.with(LEFT, left)
    }

    /// Sets the right offset of each point.
    pub fn right(self, right: impl Into<Property>) -> Self {
        self.with(RIGHT, right)
    }

    /// Sets the top offset of each point.
    pub fn top(self, top: impl Into<Property>) -> Self {
        self.with(TOP, top)
    }

    /// Sets the bottom offset of each point.
    pub fn bottom(self, bottom: impl Into<Property>) -> Self {
        self.with(BOTTOM, bottom)
    }

    /// Sets point visibility. Invisible points break the line.
    pub fn visible(self, visible: impl Into<Property>) -> Self {
        self.with(VISIBLE, visible)
    }

    /// Sets the stroke width in pixels.
    pub fn line_width(self, width: impl Into<Property>) -> Self {
        self.with(LINE_WIDTH, width)
    }

    /// Sets the stroke color; a null color disables the stroke.
    pub fn stroke_style(self, style: impl Into<Property>) -> Self {
        self.with(STROKE_STYLE, style)
    }

    /// Sets the fill color; a non-null fill fills the area the polyline encloses.
    pub fn fill_style(self, style: impl Into<Property>) -> Self {
        self.with(FILL_STYLE, style)
    }

    /// Sets whether segments are styled independently.
    ///
    /// This property is fixed: it takes a plain `bool`, never a per-datum function.
    pub fn segmented(self, segmented: bool) -> Self {
        self.with(SEGMENTED, segmented)
    }

    fn with(mut self, name: &'static str, value: impl Into<Property>) -> Self {
        // Typed setters only name properties of `line_type`, so this never fails.
        if let Err(err) = self.base.insert(name, value) {
            log::warn!("{err}");
        }
        self
    }

    /// Sets any property by name, with validation and casting.
    pub fn set(&mut self, name: &str, value: impl Into<Property>) -> Result<&mut Self, MarkError> {
        self.base.set(name, value)?;
        Ok(self)
    }

    /// Renders the line and assembles its drawable paths.
    pub fn paths(&self, cx: &RenderContext) -> Result<Vec<StyledPath>, MarkError> {
        Ok(line_paths(&self.render(cx)?))
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Mark for Line {
    fn base(&self) -> &MarkBase {
        &self.base
    }

    fn build_instance(
        &self,
        cx: &BuildContext<'_>,
        s: &mut SceneInstance,
    ) -> Result<(), MarkError> {
        let scene = cx.scene();
        let shares_style = cx.index() > 0
            && !scene.fixed.flag(SEGMENTED)
            && scene.instances.first().is_some_and(|first| first.visible);
        if !shares_style {
            return default_build_instance(self, cx, s);
        }

        // Style comes from the first point; only position (and visibility, which breaks
        // the path) vary along a non-segmented line.
        s.set(VISIBLE, cx.get(VISIBLE)?);
        if !s.visible {
            return Ok(());
        }
        s.left = cx.get(LEFT)?.as_f64();
        s.top = cx.get(TOP)?.as_f64();
        s.bottom = cx.get(BOTTOM)?.as_f64();
        s.right = cx.get(RIGHT)?.as_f64();
        self.build_implied(cx, s);
        log::trace!("line point {} built from shared style", cx.index());
        Ok(())
    }
}
