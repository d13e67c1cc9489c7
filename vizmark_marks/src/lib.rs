// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf marks built on `vizmark_core`.
//!
//! - [`Line`]: a stroked (optionally filled) polyline, one point per datum.
//! - [`Layout`]: the base for marks positioned by a layout algorithm, with
//!   [`LayoutType::property`] to declare the algorithm's fixed settings.
//!
//! [`line_paths`] turns a rendered line scene into [`StyledPath`]s for a drawing backend.

#![no_std]

extern crate alloc;

mod layout;
pub mod line;
mod paths;

pub use layout::{Arrange, Layout, LayoutType};
pub use line::{Line, line_type};
pub use paths::{StrokeStyle, StyledPath, line_paths};
