// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic property values.
//!
//! Marks are declared with loosely typed properties (a width may be authored as `"5"`),
//! so evaluation produces a [`Value`]. Casts registered on the mark type normalize values
//! into the shape the renderer expects.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use peniko::Color;

/// A resolved (or authored) property value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A number, typically in scene units (pixels).
    Number(f64),
    /// A string, e.g. an unparsed color or a label.
    Str(Arc<str>),
    /// A color.
    Color(Color),
    /// An ordered tuple of values, used for row-like data such as points.
    Array(Arc<[Value]>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the number, if this is a [`Value::Number`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the flag, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the color, if this is a [`Value::Color`].
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns the `i`-th element of an array value.
    pub fn get(&self, i: usize) -> Option<&Self> {
        match self {
            Self::Array(items) => items.get(i),
            _ => None,
        }
    }

    /// Returns the `i`-th element of an array value as a number.
    pub fn f64_at(&self, i: usize) -> Option<f64> {
        self.get(i).and_then(Self::as_f64)
    }

    /// A short name for the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Color(_) => "color",
            Self::Array(_) => "array",
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<[f64; 2]> for Value {
    fn from([a, b]: [f64; 2]) -> Self {
        Self::Array(Arc::from([Self::Number(a), Self::Number(b)]))
    }
}

impl From<(f64, f64)> for Value {
    fn from((a, b): (f64, f64)) -> Self {
        Self::from([a, b])
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::Array(Arc::from(value))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use peniko::color::palette::css;

    #[test]
    fn point_data_exposes_coordinates() {
        let p = Value::from((3.0, 4.0));
        assert_eq!(p.f64_at(0), Some(3.0));
        assert_eq!(p.f64_at(1), Some(4.0));
        assert_eq!(p.f64_at(2), None);
        assert_eq!(Value::Number(1.0).get(0), None);
    }

    #[test]
    fn option_none_becomes_null() {
        assert!(Value::from(None::<Color>).is_null());
        assert_eq!(Value::from(Some(css::RED)), Value::Color(css::RED));
    }
}
