// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property schemas for mark types.
//!
//! A [`MarkType`] is built once, when the type is defined, and shared by every mark of
//! that type through an `Arc`. It records, per property name, the default value, an
//! optional cast, and whether the property is *fixed* (evaluated once per scene).

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::Property;
use crate::cast::{self, Cast};

/// Whether a mark is shown. Defaults to `true`.
pub const VISIBLE: &str = "visible";
/// Distance from the parent's left edge.
pub const LEFT: &str = "left";
/// Distance from the parent's right edge.
pub const RIGHT: &str = "right";
/// Distance from the parent's top edge.
pub const TOP: &str = "top";
/// Distance from the parent's bottom edge.
pub const BOTTOM: &str = "bottom";
/// Horizontal extent, for types that declare it.
pub const WIDTH: &str = "width";
/// Vertical extent, for types that declare it.
pub const HEIGHT: &str = "height";

/// One entry of a [`MarkType`] schema.
#[derive(Clone, Debug)]
pub struct PropertyDef {
    /// Property name.
    pub name: &'static str,
    /// Value used when neither the mark nor its prototype sets the property.
    pub default: Option<Property>,
    /// Coercion applied to every value of this property.
    pub cast: Option<Cast>,
    /// Fixed properties are resolved once per scene and must be constants.
    pub fixed: bool,
}

impl PropertyDef {
    /// A per-datum property.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            default: None,
            cast: None,
            fixed: false,
        }
    }

    /// A fixed property.
    pub fn fixed(name: &'static str) -> Self {
        Self {
            fixed: true,
            ..Self::new(name)
        }
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: impl Into<Property>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the cast.
    pub fn with_cast(mut self, cast: Cast) -> Self {
        self.cast = Some(cast);
        self
    }
}

/// The property schema of a mark type.
#[derive(Clone, Debug)]
pub struct MarkType {
    name: &'static str,
    defs: Vec<PropertyDef>,
    index: HashMap<&'static str, usize>,
}

impl MarkType {
    /// Creates a type carrying the box-model properties every mark has:
    /// `visible`, `left`, `right`, `top` and `bottom`.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            defs: Vec::new(),
            index: HashMap::new(),
        }
        .define(PropertyDef::new(VISIBLE).with_default(true).with_cast(cast::boolean))
        .define(PropertyDef::new(LEFT).with_cast(cast::number))
        .define(PropertyDef::new(RIGHT).with_cast(cast::number))
        .define(PropertyDef::new(TOP).with_cast(cast::number))
        .define(PropertyDef::new(BOTTOM).with_cast(cast::number))
    }

    /// Adds a property to the schema, replacing any previous definition of that name.
    pub fn define(mut self, def: PropertyDef) -> Self {
        self.register(def);
        self
    }

    /// Adds a per-datum property with no default and no cast.
    pub fn define_property(self, name: &'static str) -> Self {
        self.define(PropertyDef::new(name))
    }

    /// Adds a fixed property with no default and no cast.
    pub fn fixed_property(self, name: &'static str) -> Self {
        self.define(PropertyDef::fixed(name))
    }

    /// In-place form of [`MarkType::define`].
    pub fn register(&mut self, def: PropertyDef) {
        if let Some(&i) = self.index.get(def.name) {
            log::warn!("mark type `{}` redefines property `{}`", self.name, def.name);
            self.defs[i] = def;
        } else {
            self.index.insert(def.name, self.defs.len());
            self.defs.push(def);
        }
    }

    /// The type name, e.g. `"line"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up a property definition.
    pub fn def(&self, name: &str) -> Option<&PropertyDef> {
        self.index.get(name).map(|&i| &self.defs[i])
    }

    /// Returns `true` if the schema declares `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All definitions, in declaration order.
    pub fn defs(&self) -> &[PropertyDef] {
        &self.defs
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn base_schema_has_box_model_properties() {
        let ty = MarkType::new("dot");
        for name in [VISIBLE, LEFT, RIGHT, TOP, BOTTOM] {
            assert!(ty.contains(name), "{name}");
        }
        assert!(!ty.contains(WIDTH));
        assert_eq!(ty.defs()[0].name, VISIBLE);
    }

    #[test]
    fn redefinition_replaces_in_place() {
        let ty = MarkType::new("dot")
            .define_property("size")
            .define(PropertyDef::fixed("size").with_cast(cast::number));
        let def = ty.def("size").unwrap();
        assert!(def.fixed);
        assert!(def.cast.is_some());
        assert_eq!(ty.defs().iter().filter(|d| d.name == "size").count(), 1);
    }
}
