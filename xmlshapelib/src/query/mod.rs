//! Query processing: filter and sort path statistics.
//!
//! This module handles the third stage of the pipeline - transforming a raw
//! scan result into a query-ready format. It provides:
//!
//! - **Options**: Scan and query configuration (`AttributeKeys`, `PathKinds`, `Ordering`)
//! - **QuerySet**: Processed data ready for presentation
//!
//! ## Example
//!
//! ```rust,ignore
//! use xmlshapelib::query::{Ordering, PathKinds, PathQuerySet};
//!
//! let queryset = PathQuerySet::from_result(
//!     &result,
//!     PathKinds::attributes_only(),
//!     1,
//!     Ordering::by_occurrences(),
//! );
//! ```

pub mod options;
pub mod queryset;

pub use options::{
    AttributeEntryPolicy, AttributeKeys, OrderBy, OrderDirection, Ordering, PathKinds,
};
pub use queryset::{PathQuerySet, QueryItem};
