// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property values and the context property functions are evaluated in.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use peniko::Color;

use crate::{SceneInstance, Theme, Value};

/// Signature of a per-datum property function.
pub type PropertyFn = dyn Fn(&PropertyContext<'_>) -> Value + Send + Sync;

/// An authored property: either a constant, or a function of the datum being built.
#[derive(Clone)]
pub enum Property {
    /// The same value for every datum.
    Const(Value),
    /// Evaluated once per datum (or once per scene for fixed properties, which reject this).
    Func(Arc<PropertyFn>),
}

impl Property {
    /// Wraps a closure as a per-datum property.
    pub fn func(f: impl Fn(&PropertyContext<'_>) -> Value + Send + Sync + 'static) -> Self {
        Self::Func(Arc::new(f))
    }

    /// Returns `true` if this property is evaluated per datum.
    pub fn is_func(&self) -> bool {
        matches!(self, Self::Func(_))
    }

    pub(crate) fn evaluate(&self, cx: &PropertyContext<'_>) -> Value {
        match self {
            Self::Const(v) => v.clone(),
            Self::Func(f) => f(cx),
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(v) => f.debug_tuple("Const").field(v).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<Value> for Property {
    fn from(value: Value) -> Self {
        Self::Const(value)
    }
}

impl From<f64> for Property {
    fn from(value: f64) -> Self {
        Self::Const(value.into())
    }
}

impl From<i32> for Property {
    fn from(value: i32) -> Self {
        Self::Const(value.into())
    }
}

impl From<bool> for Property {
    fn from(value: bool) -> Self {
        Self::Const(value.into())
    }
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Self::Const(value.into())
    }
}

impl From<String> for Property {
    fn from(value: String) -> Self {
        Self::Const(value.into())
    }
}

impl From<Color> for Property {
    fn from(value: Color) -> Self {
        Self::Const(value.into())
    }
}

impl From<Option<Color>> for Property {
    fn from(value: Option<Color>) -> Self {
        Self::Const(value.into())
    }
}

/// What a property function can see while one scene instance is being built.
#[derive(Clone, Copy, Debug)]
pub struct PropertyContext<'a> {
    pub(crate) index: usize,
    pub(crate) datum: &'a Value,
    pub(crate) sibling: Option<&'a SceneInstance>,
    pub(crate) series: usize,
    pub(crate) theme: &'a Theme,
}

impl<'a> PropertyContext<'a> {
    /// Index of the datum within the mark's data.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The datum being built.
    pub fn datum(&self) -> &'a Value {
        self.datum
    }

    /// The previously built instance of the same scene, if any.
    pub fn sibling(&self) -> Option<&'a SceneInstance> {
        self.sibling
    }

    /// Index of the enclosing series (the parent instance).
    pub fn series(&self) -> usize {
        self.series
    }

    /// The theme of the current render pass.
    pub fn theme(&self) -> &'a Theme {
        self.theme
    }
}
