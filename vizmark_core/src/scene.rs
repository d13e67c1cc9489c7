// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-pass output: one [`Scene`] per mark, one [`SceneInstance`] per datum.
//!
//! Scenes are transient. Every render pass builds a fresh scene; nothing is patched in
//! place across passes.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

use crate::Value;
use crate::schema::{BOTTOM, HEIGHT, LEFT, RIGHT, TOP, VISIBLE, WIDTH};

/// The resolved state of one datum.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneInstance {
    /// Index of the datum within the mark's data.
    pub index: usize,
    /// The datum itself.
    pub datum: Value,
    /// Whether the instance is shown. Invisible instances carry no other properties.
    pub visible: bool,
    /// Resolved left offset.
    pub left: Option<f64>,
    /// Resolved right offset.
    pub right: Option<f64>,
    /// Resolved top offset.
    pub top: Option<f64>,
    /// Resolved bottom offset.
    pub bottom: Option<f64>,
    /// Resolved width, for types that declare it.
    pub width: Option<f64>,
    /// Resolved height, for types that declare it.
    pub height: Option<f64>,
    properties: SmallVec<[(&'static str, Value); 4]>,
}

impl SceneInstance {
    /// Creates an empty, visible instance for a datum.
    pub fn new(index: usize, datum: Value) -> Self {
        Self {
            index,
            datum,
            visible: true,
            left: None,
            right: None,
            top: None,
            bottom: None,
            width: None,
            height: None,
            properties: SmallVec::new(),
        }
    }

    /// Stores a resolved property. Box-model names go to their dedicated fields.
    pub fn set(&mut self, name: &'static str, value: Value) {
        match name {
            VISIBLE => self.visible = value.as_bool().unwrap_or(true),
            LEFT => self.left = value.as_f64(),
            RIGHT => self.right = value.as_f64(),
            TOP => self.top = value.as_f64(),
            BOTTOM => self.bottom = value.as_f64(),
            WIDTH => self.width = value.as_f64(),
            HEIGHT => self.height = value.as_f64(),
            _ => {
                if let Some(slot) = self.properties.iter_mut().find(|(n, _)| *n == name) {
                    slot.1 = value;
                } else {
                    self.properties.push((name, value));
                }
            }
        }
    }

    /// Returns a resolved non-box-model property.
    ///
    /// `None` means the property was not evaluated for this instance, which is the case
    /// for invisible instances and for instances that share style with the first one.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Returns `true` if any non-box-model property was evaluated for this instance.
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// The anchor point `(left, top)`, treating unresolved offsets as zero.
    pub fn point(&self) -> Point {
        Point::new(self.left.unwrap_or(0.0), self.top.unwrap_or(0.0))
    }
}

/// Values of fixed properties, resolved once per scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedValues(SmallVec<[(&'static str, Value); 2]>);

impl FixedValues {
    /// Records a value.
    pub fn insert(&mut self, name: &'static str, value: Value) {
        if let Some(slot) = self.0.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    /// Returns the value of a fixed property.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Returns a fixed property as a flag; unset and non-boolean values are `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Returns a fixed property as a number.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }
}

/// The output of rendering one mark.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Name of the mark type that produced the scene.
    pub mark_type: &'static str,
    /// Fixed property values shared by every instance.
    pub fixed: FixedValues,
    /// One instance per datum, in data order.
    pub instances: Vec<SceneInstance>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new(mark_type: &'static str, fixed: FixedValues) -> Self {
        Self {
            mark_type,
            fixed,
            instances: Vec::new(),
        }
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if the scene has no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Iterates visible instances.
    pub fn visible(&self) -> impl Iterator<Item = &SceneInstance> {
        self.instances.iter().filter(|s| s.visible)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn box_model_names_go_to_fields() {
        let mut s = SceneInstance::new(0, Value::Null);
        s.set(LEFT, Value::Number(3.0));
        s.set(TOP, Value::Number(4.0));
        s.set("line_width", Value::Number(2.0));
        s.set("line_width", Value::Number(5.0));
        assert_eq!(s.point(), Point::new(3.0, 4.0));
        assert_eq!(s.get(LEFT), None);
        assert_eq!(s.get("line_width"), Some(&Value::Number(5.0)));
    }

    #[test]
    fn missing_fixed_flag_is_false() {
        let mut fixed = FixedValues::default();
        assert!(!fixed.flag("segmented"));
        fixed.insert("segmented", Value::Bool(true));
        assert!(fixed.flag("segmented"));
    }
}
