// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mark base: property storage, inheritance, and the instance-building traversal.
//!
//! Concrete marks compose a [`MarkBase`] and implement [`Mark`]. The build cycle is:
//!
//! 1. resolve fixed properties once ([`Scene::fixed`]),
//! 2. for each datum, call [`Mark::build_instance`], which by default evaluates every
//!    per-datum property ([`default_build_instance`]) and then fills missing box-model
//!    geometry ([`Mark::build_implied`]),
//! 3. call [`Mark::finish_scene`] so marks can post-process the whole scene.
//!
//! Property values resolve in this order: set on the mark, inherited through
//! [`MarkBase::extend`], the type default, then [`Value::Null`].

extern crate alloc;

use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Size;

use crate::schema::{HEIGHT, VISIBLE, WIDTH};
use crate::{
    FixedValues, MarkError, MarkType, Property, PropertyContext, RenderContext, Scene,
    SceneInstance, Value,
};

type PropertyMap = HashMap<&'static str, Property>;

#[derive(Clone, Debug, Default)]
struct Prototype {
    properties: PropertyMap,
    data: Option<Arc<[Value]>>,
}

/// Declared state shared by every mark kind.
#[derive(Clone, Debug)]
pub struct MarkBase {
    ty: Arc<MarkType>,
    properties: PropertyMap,
    proto: Option<Arc<Prototype>>,
    data: Option<Arc<[Value]>>,
}

impl MarkBase {
    /// Creates a mark of the given type with nothing set.
    pub fn new(ty: Arc<MarkType>) -> Self {
        Self {
            ty,
            properties: PropertyMap::new(),
            proto: None,
            data: None,
        }
    }

    /// The mark's type schema.
    pub fn mark_type(&self) -> &MarkType {
        &self.ty
    }

    /// Sets a property by name.
    ///
    /// Unknown names are rejected, as are per-datum functions for fixed properties.
    /// Constants are cast immediately, so `"5"` set on a numeric property is stored as
    /// `5.0`.
    pub fn set(&mut self, name: &str, value: impl Into<Property>) -> Result<&mut Self, MarkError> {
        let def = self.ty.def(name).ok_or_else(|| MarkError::UnknownProperty {
            mark: self.ty.name(),
            property: name.to_string(),
        })?;
        let key = def.name;
        let value = match value.into() {
            Property::Func(_) if def.fixed => return Err(MarkError::FixedProperty(key)),
            Property::Const(v) => match def.cast {
                Some(cast) => Property::Const(
                    cast(v).map_err(|source| MarkError::Cast {
                        property: key,
                        source,
                    })?,
                ),
                None => Property::Const(v),
            },
            func => func,
        };
        self.properties.insert(key, value);
        Ok(self)
    }

    /// Stores a property as given, checking only that the name is in the schema.
    ///
    /// Used by typed setters. Values are not cast and functions are accepted for fixed
    /// properties; both kinds of mistake surface when the mark is rendered.
    pub fn insert(
        &mut self,
        name: &'static str,
        value: impl Into<Property>,
    ) -> Result<&mut Self, MarkError> {
        if !self.ty.contains(name) {
            return Err(MarkError::UnknownProperty {
                mark: self.ty.name(),
                property: name.to_string(),
            });
        }
        self.properties.insert(name, value.into());
        Ok(self)
    }

    /// Sets the data, one instance per item.
    pub fn set_data<I>(&mut self, data: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let data: Vec<Value> = data.into_iter().map(Into::into).collect();
        self.data = Some(Arc::from(data));
    }

    /// The data this mark will render: its own, else inherited, else a single null datum.
    pub fn data(&self) -> Arc<[Value]> {
        self.data
            .clone()
            .or_else(|| self.proto.as_ref().and_then(|p| p.data.clone()))
            .unwrap_or_else(|| Arc::from([Value::Null]))
    }

    /// Inherits the effective properties and data of `parent` as defaults.
    ///
    /// Values set on `self` still win. Later changes to `parent` are not observed.
    pub fn extend(&mut self, parent: &Self) {
        let mut properties = parent
            .proto
            .as_ref()
            .map(|p| p.properties.clone())
            .unwrap_or_default();
        properties.extend(parent.properties.iter().map(|(k, v)| (*k, v.clone())));
        let data = parent
            .data
            .clone()
            .or_else(|| parent.proto.as_ref().and_then(|p| p.data.clone()));
        self.proto = Some(Arc::new(Prototype { properties, data }));
    }

    /// Returns `true` if the property is set on this mark or inherited.
    pub fn is_set(&self, name: &str) -> bool {
        self.properties.contains_key(name)
            || self
                .proto
                .as_ref()
                .is_some_and(|p| p.properties.contains_key(name))
    }

    /// Resolves the authored property for `name`, falling back to the type default.
    pub fn resolve(&self, name: &str) -> Option<&Property> {
        self.properties
            .get(name)
            .or_else(|| self.proto.as_ref().and_then(|p| p.properties.get(name)))
            .or_else(|| self.ty.def(name).and_then(|d| d.default.as_ref()))
    }

    /// Evaluates every fixed property once. Fixed properties must be constants.
    pub fn evaluate_fixed(&self) -> Result<FixedValues, MarkError> {
        let mut fixed = FixedValues::default();
        for def in self.ty.defs().iter().filter(|d| d.fixed) {
            let value = match self.resolve(def.name) {
                Some(Property::Const(v)) => v.clone(),
                Some(Property::Func(_)) => return Err(MarkError::FixedProperty(def.name)),
                None => Value::Null,
            };
            fixed.insert(def.name, cast_value(&self.ty, def.name, value)?);
        }
        Ok(fixed)
    }
}

fn cast_value(ty: &MarkType, name: &'static str, value: Value) -> Result<Value, MarkError> {
    match ty.def(name).and_then(|d| d.cast) {
        Some(cast) => cast(value).map_err(|source| MarkError::Cast {
            property: name,
            source,
        }),
        None => Ok(value),
    }
}

/// State visible to [`Mark::build_instance`] while one datum is built.
#[derive(Clone, Copy, Debug)]
pub struct BuildContext<'a> {
    mark: &'a MarkBase,
    render: &'a RenderContext,
    scene: &'a Scene,
    index: usize,
    datum: &'a Value,
}

impl<'a> BuildContext<'a> {
    /// Index of the datum being built.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The datum being built.
    pub fn datum(&self) -> &'a Value {
        self.datum
    }

    /// The scene so far: fixed values plus the instances already built.
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// The mark's type schema.
    pub fn mark_type(&self) -> &'a MarkType {
        self.mark.mark_type()
    }

    /// The mark being built.
    pub fn mark(&self) -> &'a MarkBase {
        self.mark
    }

    /// Size of the parent panel.
    pub fn parent_size(&self) -> Size {
        self.render.size
    }

    /// Resolves and evaluates a property for the current datum, applying its cast.
    ///
    /// Unset properties evaluate to [`Value::Null`].
    pub fn get(&self, name: &'static str) -> Result<Value, MarkError> {
        let Some(property) = self.mark.resolve(name) else {
            return Ok(Value::Null);
        };
        let cx = PropertyContext {
            index: self.index,
            datum: self.datum,
            sibling: self.scene.instances.last(),
            series: self.render.series,
            theme: &self.render.theme,
        };
        cast_value(self.mark.mark_type(), name, property.evaluate(&cx))
    }
}

/// A renderable mark.
///
/// Implementors supply [`Mark::base`]; the build hooks default to the generic behavior
/// and are overridden where a mark can do better.
pub trait Mark {
    /// The declared state of this mark.
    fn base(&self) -> &MarkBase;

    /// Builds the instance for one datum.
    fn build_instance(
        &self,
        cx: &BuildContext<'_>,
        s: &mut SceneInstance,
    ) -> Result<(), MarkError> {
        default_build_instance(self, cx, s)
    }

    /// Fills box-model fields that were not set explicitly.
    fn build_implied(&self, cx: &BuildContext<'_>, s: &mut SceneInstance) {
        default_build_implied(cx, s);
    }

    /// Post-processes the finished scene.
    fn finish_scene(&self, _cx: &RenderContext, _scene: &mut Scene) -> Result<(), MarkError> {
        Ok(())
    }

    /// Runs one render pass.
    fn render(&self, cx: &RenderContext) -> Result<Scene, MarkError> {
        render(self, cx)
    }
}

/// Generic instance construction: evaluates `visible`, then, for visible instances,
/// every non-fixed property in schema order, then implied geometry.
pub fn default_build_instance<M: Mark + ?Sized>(
    mark: &M,
    cx: &BuildContext<'_>,
    s: &mut SceneInstance,
) -> Result<(), MarkError> {
    s.set(VISIBLE, cx.get(VISIBLE)?);
    if !s.visible {
        return Ok(());
    }
    for def in cx.mark_type().defs() {
        if def.fixed || def.name == VISIBLE {
            continue;
        }
        s.set(def.name, cx.get(def.name)?);
    }
    mark.build_implied(cx, s);
    Ok(())
}

/// Fills missing `left`/`right`/`top`/`bottom` from the parent size.
///
/// Types without `width`/`height` are treated as zero-sized, so a mark positioned by
/// `left` gets `right = parent_width - left`. Types that declare `width`/`height` get
/// the missing extent or the missing side derived, in that order of preference.
pub fn default_build_implied(cx: &BuildContext<'_>, s: &mut SceneInstance) {
    let ty = cx.mark_type();
    let size = cx.parent_size();

    let has_width = ty.contains(WIDTH);
    let (left, right, width) = implied_span(
        size.width,
        s.left,
        s.right,
        if has_width { s.width } else { Some(0.0) },
    );
    s.left = Some(left);
    s.right = Some(right);
    if has_width {
        s.width = Some(width);
    }

    let has_height = ty.contains(HEIGHT);
    let (top, bottom, height) = implied_span(
        size.height,
        s.top,
        s.bottom,
        if has_height { s.height } else { Some(0.0) },
    );
    s.top = Some(top);
    s.bottom = Some(bottom);
    if has_height {
        s.height = Some(height);
    }
}

fn implied_span(
    extent: f64,
    start: Option<f64>,
    end: Option<f64>,
    span: Option<f64>,
) -> (f64, f64, f64) {
    match (start, end, span) {
        (start, end, None) => {
            let start = start.unwrap_or(0.0);
            let end = end.unwrap_or(0.0);
            (start, end, extent - start - end)
        }
        (start, None, Some(span)) => {
            let start = start.unwrap_or(0.0);
            (start, extent - span - start, span)
        }
        (None, Some(end), Some(span)) => (extent - span - end, end, span),
        (Some(start), Some(end), Some(span)) => (start, end, span),
    }
}

/// Runs one render pass for `mark`, producing a fresh [`Scene`].
pub fn render<M: Mark + ?Sized>(mark: &M, cx: &RenderContext) -> Result<Scene, MarkError> {
    let base = mark.base();
    let fixed = base.evaluate_fixed()?;
    let data = base.data();

    let mut scene = Scene::new(base.mark_type().name(), fixed);
    scene.instances.reserve(data.len());
    for (index, datum) in data.iter().enumerate() {
        let mut s = SceneInstance::new(index, datum.clone());
        let build = BuildContext {
            mark: base,
            render: cx,
            scene: &scene,
            index,
            datum,
        };
        mark.build_instance(&build, &mut s)?;
        scene.instances.push(s);
    }
    mark.finish_scene(cx, &mut scene)?;

    log::debug!(
        "rendered {} mark: {} instances ({} visible)",
        scene.mark_type,
        scene.len(),
        scene.visible().count()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::cast;
    use crate::schema::{BOTTOM, LEFT, RIGHT, TOP};
    use crate::{CastError, PropertyDef};

    #[derive(Debug)]
    struct Dot {
        base: MarkBase,
    }

    impl Mark for Dot {
        fn base(&self) -> &MarkBase {
            &self.base
        }
    }

    fn dot_type() -> Arc<MarkType> {
        Arc::new(
            MarkType::new("dot")
                .define(PropertyDef::new("size").with_default(4.0).with_cast(cast::number))
                .define(PropertyDef::fixed("shape").with_cast(cast::string)),
        )
    }

    fn dot() -> Dot {
        Dot {
            base: MarkBase::new(dot_type()),
        }
    }

    #[test]
    fn unset_data_renders_one_null_datum() {
        let scene = dot().render(&RenderContext::default()).unwrap();
        assert_eq!(scene.len(), 1);
        assert!(scene.instances[0].datum.is_null());
        assert_eq!(scene.instances[0].get("size"), Some(&Value::Number(4.0)));
    }

    #[test]
    fn set_rejects_unknown_names_and_fixed_functions() {
        let mut d = dot();
        assert_eq!(
            d.base.set("radius", 1.0).unwrap_err(),
            MarkError::UnknownProperty {
                mark: "dot",
                property: "radius".into()
            }
        );
        assert_eq!(
            d.base
                .set("shape", Property::func(|_| Value::from("square")))
                .unwrap_err(),
            MarkError::FixedProperty("shape")
        );
    }

    #[test]
    fn insert_checks_names_only() {
        let mut d = dot();
        assert_eq!(
            d.base.insert("radius", 1.0).unwrap_err(),
            MarkError::UnknownProperty {
                mark: "dot",
                property: "radius".into()
            }
        );
        assert!(!d.base.is_set("radius"));

        d.base
            .insert("shape", Property::func(|_| Value::from("square")))
            .unwrap();
        assert_eq!(
            d.render(&RenderContext::default()).unwrap_err(),
            MarkError::FixedProperty("shape")
        );
    }

    #[test]
    fn set_casts_constants() {
        let mut d = dot();
        d.base.set("size", "7").unwrap().set("shape", 3.0).unwrap();
        let scene = d.render(&RenderContext::default()).unwrap();
        assert_eq!(scene.instances[0].get("size"), Some(&Value::Number(7.0)));
        assert_eq!(scene.fixed.get("shape"), Some(&Value::from("3")));
    }

    #[test]
    fn cast_failures_surface_at_render() {
        let mut d = dot();
        d.base.insert("size", "huge").unwrap();
        assert_eq!(
            d.render(&RenderContext::default()).unwrap_err(),
            MarkError::Cast {
                property: "size",
                source: CastError::InvalidNumber("huge".into()),
            }
        );
    }

    #[test]
    fn functions_see_index_datum_and_sibling() {
        let mut d = dot();
        d.base.set_data([1.0, 2.0, 3.0]);
        d.base
            .set(
                LEFT,
                Property::func(|cx| {
                    let prev = cx.sibling().and_then(|s| s.left).unwrap_or(0.0);
                    Value::Number(prev + cx.datum().as_f64().unwrap_or(0.0))
                }),
            )
            .unwrap();
        d.base
            .set(TOP, Property::func(|cx| Value::Number(cx.index() as f64)))
            .unwrap();
        let scene = d.render(&RenderContext::default()).unwrap();
        let lefts: Vec<_> = scene.instances.iter().map(|s| s.left).collect();
        let tops: Vec<_> = scene.instances.iter().map(|s| s.top).collect();
        assert_eq!(lefts, vec![Some(1.0), Some(3.0), Some(6.0)]);
        assert_eq!(tops, vec![Some(0.0), Some(1.0), Some(2.0)]);
    }

    #[test]
    fn invisible_instances_skip_properties() {
        let mut d = dot();
        d.base.set_data([0.0, 1.0]);
        d.base
            .set(
                VISIBLE,
                Property::func(|cx| Value::Bool(cx.datum().as_f64() != Some(1.0))),
            )
            .unwrap();
        let scene = d.render(&RenderContext::default()).unwrap();
        assert!(scene.instances[0].visible);
        assert!(!scene.instances[1].visible);
        assert!(!scene.instances[1].has_properties());
        assert_eq!(scene.instances[1].left, None);
        assert_eq!(scene.visible().count(), 1);
    }

    #[test]
    fn implied_geometry_uses_parent_size() {
        let mut d = dot();
        d.base.set(RIGHT, 10.0).unwrap().set(BOTTOM, 20.0).unwrap();
        let cx = RenderContext::new(Size::new(100.0, 50.0));
        let s = &d.render(&cx).unwrap().instances[0];
        assert_eq!(s.left, Some(90.0));
        assert_eq!(s.top, Some(30.0));
        assert_eq!(s.width, None);
    }

    #[test]
    fn implied_geometry_derives_width_when_declared() {
        let ty = Arc::new(
            MarkType::new("bar")
                .define(PropertyDef::new(WIDTH).with_cast(cast::number))
                .define(PropertyDef::new(HEIGHT).with_cast(cast::number)),
        );
        let mut bar = Dot {
            base: MarkBase::new(ty),
        };
        bar.base
            .set(LEFT, 10.0)
            .unwrap()
            .set(RIGHT, 30.0)
            .unwrap()
            .set(HEIGHT, 5.0)
            .unwrap()
            .set(BOTTOM, 0.0)
            .unwrap();
        let cx = RenderContext::new(Size::new(100.0, 50.0));
        let s = &bar.render(&cx).unwrap().instances[0];
        assert_eq!(s.width, Some(60.0));
        assert_eq!(s.top, Some(45.0));
    }

    #[test]
    fn extend_inherits_properties_and_data() {
        let mut parent = dot();
        parent.base.set_data([5.0, 6.0]);
        parent.base.set("size", 9.0).unwrap();
        parent.base.set(TOP, 1.0).unwrap();

        let mut child = dot();
        child.base.extend(&parent.base);
        child.base.set(TOP, 2.0).unwrap();

        assert!(child.base.is_set("size"));
        let scene = child.render(&RenderContext::default()).unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.instances[1].get("size"), Some(&Value::Number(9.0)));
        assert_eq!(scene.instances[1].top, Some(2.0));
    }
}
