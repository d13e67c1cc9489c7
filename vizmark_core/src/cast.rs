// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value casts applied when a property is set or evaluated.
//!
//! Every cast passes [`Value::Null`] through unchanged: null means "unset" and is
//! resolved later (e.g. by implied geometry), not coerced.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

use peniko::color::{Srgb, parse_color};
use thiserror::Error;

use crate::Value;

/// A value coercion registered on a property definition.
pub type Cast = fn(Value) -> Result<Value, CastError>;

/// Errors produced by a [`Cast`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CastError {
    /// The value has a kind the cast cannot convert.
    #[error("expected {expected}, found {found}")]
    Mismatch {
        /// The kind the cast produces.
        expected: &'static str,
        /// The kind that was supplied.
        found: &'static str,
    },
    /// A string could not be parsed as a number.
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    /// A string could not be parsed as a boolean.
    #[error("`{0}` is not a boolean")]
    InvalidBool(String),
    /// A string could not be parsed as a CSS color.
    #[error("`{0}` is not a color")]
    InvalidColor(String),
}

/// Coerces to [`Value::Number`]. Strings are parsed; booleans map to `0`/`1`.
pub fn number(value: Value) -> Result<Value, CastError> {
    match value {
        Value::Null | Value::Number(_) => Ok(value),
        Value::Bool(b) => Ok(Value::Number(if b { 1.0 } else { 0.0 })),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| CastError::InvalidNumber(s.to_string())),
        other => Err(mismatch("number", &other)),
    }
}

/// Coerces to [`Value::Bool`]. Numbers are truthy when non-zero.
pub fn boolean(value: Value) -> Result<Value, CastError> {
    match value {
        Value::Null | Value::Bool(_) => Ok(value),
        Value::Number(n) => Ok(Value::Bool(n != 0.0 && !n.is_nan())),
        Value::Str(s) => match s.trim() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(CastError::InvalidBool(s.to_string())),
        },
        other => Err(mismatch("bool", &other)),
    }
}

/// Coerces to [`Value::Str`].
pub fn string(value: Value) -> Result<Value, CastError> {
    match value {
        Value::Null | Value::Str(_) => Ok(value),
        Value::Number(n) => Ok(Value::from(format!("{n}"))),
        Value::Bool(b) => Ok(Value::from(if b { "true" } else { "false" })),
        other => Err(mismatch("string", &other)),
    }
}

/// Coerces to [`Value::Color`], parsing CSS color strings (`"red"`, `"#1f77b4"`, ...).
pub fn color(value: Value) -> Result<Value, CastError> {
    match value {
        Value::Null | Value::Color(_) => Ok(value),
        Value::Str(s) => parse_color(&s)
            .map(|c| Value::Color(c.to_alpha_color::<Srgb>()))
            .map_err(|_| CastError::InvalidColor(s.to_string())),
        other => Err(mismatch("color", &other)),
    }
}

fn mismatch(expected: &'static str, found: &Value) -> CastError {
    CastError::Mismatch {
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use peniko::color::palette::css;

    #[test]
    fn number_parses_strings() {
        assert_eq!(number(Value::from("5")), Ok(Value::Number(5.0)));
        assert_eq!(number(Value::from(" 2.5 ")), Ok(Value::Number(2.5)));
        assert_eq!(
            number(Value::from("five")),
            Err(CastError::InvalidNumber("five".into()))
        );
    }

    #[test]
    fn null_passes_through_every_cast() {
        for cast in [number, boolean, string, color] {
            assert_eq!(cast(Value::Null), Ok(Value::Null));
        }
    }

    #[test]
    fn boolean_accepts_numbers_and_literals() {
        assert_eq!(boolean(Value::Number(0.0)), Ok(Value::Bool(false)));
        assert_eq!(boolean(Value::Number(2.0)), Ok(Value::Bool(true)));
        assert_eq!(boolean(Value::from("false")), Ok(Value::Bool(false)));
        assert!(boolean(Value::from("maybe")).is_err());
    }

    #[test]
    fn color_parses_css_names() {
        let red = color(Value::from("red")).unwrap();
        assert_eq!(red.as_color().unwrap().to_rgba8(), css::RED.to_rgba8());
        assert_eq!(
            color(Value::from("not-a-color")),
            Err(CastError::InvalidColor("not-a-color".into()))
        );
        assert_eq!(
            color(Value::Number(1.0)),
            Err(CastError::Mismatch {
                expected: "color",
                found: "number"
            })
        );
    }
}
