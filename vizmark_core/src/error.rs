// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

use crate::CastError;

/// Errors raised while declaring or rendering a mark.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MarkError {
    /// The mark type has no property with this name.
    #[error("mark type `{mark}` has no property `{property}`")]
    UnknownProperty {
        /// The mark type name.
        mark: &'static str,
        /// The requested property name.
        property: String,
    },
    /// A per-datum function was supplied for a fixed property.
    #[error("property `{0}` is fixed and cannot be a per-datum function")]
    FixedProperty(&'static str),
    /// A property value could not be cast.
    #[error("property `{property}` could not be cast")]
    Cast {
        /// The property whose value failed.
        property: &'static str,
        /// The underlying cast failure.
        source: CastError,
    },
    /// A layout could not derive positions for its instances.
    #[error("layout `{layout}` failed to arrange: {reason}")]
    Arrange {
        /// The layout type name.
        layout: &'static str,
        /// Why arrangement failed.
        reason: String,
    },
}
