// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout marks.
//!
//! A layout is a mark whose instances are positioned by an algorithm (a radial tree, a
//! treemap, ...) rather than by per-datum property functions. The algorithm is
//! configured through *fixed* properties that a layout type registers once, with a cast,
//! via [`LayoutType::property`]. After the scene is built, the layout's [`Arrange`]
//! implementation derives positional fields from those settings and the data.

extern crate alloc;

use alloc::sync::Arc;
use core::fmt;

use vizmark_core::{
    Cast, FixedValues, Mark, MarkBase, MarkError, MarkType, Property, PropertyDef,
    RenderContext, Scene, SceneInstance, Value,
};

/// Derives positions for the instances of a layout scene.
pub trait Arrange: Send + Sync {
    /// Writes derived fields (typically `left`/`top`) into `instances`.
    fn arrange(
        &self,
        fixed: &FixedValues,
        cx: &RenderContext,
        instances: &mut [SceneInstance],
    ) -> Result<(), MarkError>;
}

/// Declares the schema of a layout type.
#[derive(Clone, Debug)]
pub struct LayoutType {
    ty: MarkType,
}

impl LayoutType {
    /// Starts a layout type with the base box-model properties.
    pub fn new(name: &'static str) -> Self {
        Self {
            ty: MarkType::new(name),
        }
    }

    /// Registers a fixed property whose values are coerced by `cast` whenever set.
    ///
    /// This changes the schema for every layout of this type. Registering an existing
    /// name replaces its definition.
    pub fn property(mut self, name: &'static str, cast: Cast) -> Self {
        self.ty.register(PropertyDef::fixed(name).with_cast(cast));
        self
    }

    /// Registers an arbitrary property definition, e.g. a per-datum one.
    pub fn define(mut self, def: PropertyDef) -> Self {
        self.ty.register(def);
        self
    }

    /// Finishes the declaration.
    pub fn build(self) -> Arc<MarkType> {
        Arc::new(self.ty)
    }
}

/// A mark positioned by a layout algorithm.
#[derive(Clone)]
pub struct Layout {
    base: MarkBase,
    arrange: Option<Arc<dyn Arrange>>,
}

impl Layout {
    /// Creates a layout of the given type.
    pub fn new(ty: &Arc<MarkType>) -> Self {
        Self {
            base: MarkBase::new(Arc::clone(ty)),
            arrange: None,
        }
    }

    /// Sets the data, one instance per item.
    pub fn data<I>(mut self, data: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.base.set_data(data);
        self
    }

    /// Sets the algorithm that positions the built instances.
    pub fn with_arrange(mut self, arrange: impl Arrange + 'static) -> Self {
        self.arrange = Some(Arc::new(arrange));
        self
    }

    /// Sets a property by name, casting constants with the registered cast.
    pub fn set(&mut self, name: &str, value: impl Into<Property>) -> Result<&mut Self, MarkError> {
        self.base.set(name, value)?;
        Ok(self)
    }

    /// Sets a property by name and returns the layout, for use in a builder chain.
    pub fn try_with(mut self, name: &str, value: impl Into<Property>) -> Result<Self, MarkError> {
        self.base.set(name, value)?;
        Ok(self)
    }

    /// Returns the constant currently set (or inherited) for `name`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.base.resolve(name)? {
            Property::Const(v) => Some(v),
            Property::Func(_) => None,
        }
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("base", &self.base)
            .field("arrange", &self.arrange.is_some())
            .finish()
    }
}

impl Mark for Layout {
    fn base(&self) -> &MarkBase {
        &self.base
    }

    fn finish_scene(&self, cx: &RenderContext, scene: &mut Scene) -> Result<(), MarkError> {
        let Some(arrange) = &self.arrange else {
            return Ok(());
        };
        arrange.arrange(&scene.fixed, cx, &mut scene.instances)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use kurbo::Size;
    use vizmark_core::cast;

    use super::*;

    /// Places instances evenly on a circle around the parent's center.
    struct Wheel;

    impl Arrange for Wheel {
        fn arrange(
            &self,
            fixed: &FixedValues,
            cx: &RenderContext,
            instances: &mut [SceneInstance],
        ) -> Result<(), MarkError> {
            let Some(radius) = fixed.number("radius") else {
                return Err(MarkError::Arrange {
                    layout: "wheel",
                    reason: "radius is not set".to_string(),
                });
            };
            let n = instances.len() as f64;
            let (cx0, cy0) = (cx.size.width / 2.0, cx.size.height / 2.0);
            for s in instances.iter_mut() {
                let a = core::f64::consts::TAU * s.index as f64 / n;
                s.left = Some(cx0 + radius * a.cos());
                s.top = Some(cy0 + radius * a.sin());
            }
            Ok(())
        }
    }

    fn wheel_type() -> Arc<MarkType> {
        LayoutType::new("wheel")
            .property("radius", cast::number)
            .property("clockwise", cast::boolean)
            .build()
    }

    #[test]
    fn registered_property_casts_on_set() {
        let ty = wheel_type();
        let mut layout = Layout::new(&ty);
        layout.set("radius", "5").unwrap();
        assert_eq!(layout.value("radius"), Some(&Value::Number(5.0)));
        assert!(ty.def("radius").unwrap().fixed);
    }

    #[test]
    fn registered_property_is_fixed() {
        let mut layout = Layout::new(&wheel_type());
        assert_eq!(
            layout
                .set("radius", Property::func(|cx| Value::Number(cx.index() as f64)))
                .unwrap_err(),
            MarkError::FixedProperty("radius")
        );
    }

    #[test]
    fn registration_is_shared_by_the_type() {
        let ty = wheel_type();
        let mut a = Layout::new(&ty);
        let mut b = Layout::new(&ty);
        a.set("clockwise", 1.0).unwrap();
        b.set("clockwise", "false").unwrap();
        assert_eq!(a.value("clockwise"), Some(&Value::Bool(true)));
        assert_eq!(b.value("clockwise"), Some(&Value::Bool(false)));
    }

    #[test]
    fn arrange_positions_instances() {
        let mut layout = Layout::new(&wheel_type())
            .data([1.0, 2.0, 3.0, 4.0])
            .with_arrange(Wheel);
        layout.set("radius", 10.0).unwrap();

        let scene = layout
            .render(&RenderContext::new(Size::new(100.0, 100.0)))
            .unwrap();
        assert_eq!(scene.fixed.number("radius"), Some(10.0));
        let p0 = scene.instances[0].point();
        let p1 = scene.instances[1].point();
        assert!((p0.x - 60.0).abs() < 1e-9 && (p0.y - 50.0).abs() < 1e-9);
        assert!((p1.x - 50.0).abs() < 1e-9 && (p1.y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn builder_chain_sets_registered_properties() {
        let layout = Layout::new(&wheel_type())
            .data([1.0, 2.0])
            .try_with("radius", "2.5")
            .and_then(|l| l.try_with("clockwise", "true"))
            .unwrap();
        assert_eq!(layout.value("radius"), Some(&Value::Number(2.5)));
        assert_eq!(layout.value("clockwise"), Some(&Value::Bool(true)));

        let err = Layout::new(&wheel_type())
            .try_with("spokes", 6.0)
            .unwrap_err();
        assert_eq!(
            err,
            MarkError::UnknownProperty {
                mark: "wheel",
                property: "spokes".to_string()
            }
        );
    }

    #[test]
    fn arrange_errors_propagate() {
        let layout = Layout::new(&wheel_type()).with_arrange(Wheel);
        assert!(matches!(
            layout.render(&RenderContext::default()),
            Err(MarkError::Arrange { layout: "wheel", .. })
        ));
    }
}
