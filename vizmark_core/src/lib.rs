// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core of a declarative mark system.
//!
//! A *mark* is a scenegraph primitive whose properties are either constants or
//! functions of the datum being drawn. Rendering a mark evaluates those properties once
//! per datum and produces a [`Scene`]: an ordered list of resolved [`SceneInstance`]s
//! that a drawing backend can consume.
//!
//! This crate provides:
//! - [`Value`] and [`cast`]s for loosely typed property values,
//! - [`MarkType`] schemas (defaults, casts, fixed flags), declared once per mark kind,
//! - [`MarkBase`] and the [`Mark`] trait with the generic build cycle, and
//! - [`Theme`]/[`RenderContext`] for render-pass configuration.
//!
//! Concrete marks live in downstream crates.

#![no_std]

extern crate alloc;

pub mod cast;
mod error;
mod mark;
mod property;
pub mod schema;
mod scene;
mod theme;
mod value;

pub use cast::{Cast, CastError};
pub use error::MarkError;
pub use mark::{
    BuildContext, Mark, MarkBase, default_build_implied, default_build_instance, render,
};
pub use property::{Property, PropertyContext, PropertyFn};
pub use schema::{MarkType, PropertyDef};
pub use scene::{FixedValues, Scene, SceneInstance};
pub use theme::{CATEGORY10, RenderContext, Theme};
pub use value::Value;
