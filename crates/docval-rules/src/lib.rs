//! Builtin CSAF 2.0 checks for docval
//!
//! Checks are grouped into four category sources, registered in this order:
//!
//! | source        | checks                                                   |
//! |---------------|----------------------------------------------------------|
//! | `schema`      | `csaf_2_0`                                               |
//! | `mandatory`   | `mandatoryTest_6_1_1`, `_6_1_2`, `_6_1_4`, `_6_1_16`     |
//! | `optional`    | `optionalTest_6_2_1`, `optionalTest_6_2_10`              |
//! | `informative` | `informativeTest_6_3_1`, `informativeTest_6_3_2`         |
//!
//! [`builtin_catalog`] adds the combination presets on top:
//! `basic` (schema + mandatory), `extended` (basic + optional) and
//! `full` (extended + informative).

pub mod informative;
pub mod mandatory;
pub mod optional;
pub mod pointer;
pub mod product;
pub mod schema;

use std::sync::Arc;

use docval_core::{Catalog, CheckRef, CheckSource, Result};

pub use pointer::Pointer;
pub use schema::SchemaCheck;

/// Category sources in registration order.
pub fn builtin_sources() -> Vec<CheckSource> {
    let schema: CheckRef = Arc::new(SchemaCheck::csaf_2_0());
    vec![
        CheckSource::new("schema", vec![schema]),
        CheckSource::new("mandatory", mandatory::checks()),
        CheckSource::new("optional", optional::checks()),
        CheckSource::new("informative", informative::checks()),
    ]
}

/// Build the production catalog.
pub fn builtin_catalog() -> Result<Catalog> {
    let mut builder = Catalog::builder();
    for source in builtin_sources() {
        builder = builder.source(source)?;
    }
    let catalog = builder
        .combination("basic", &["schema", "mandatory"])?
        .combination("extended", &["basic", "optional"])?
        .combination("full", &["extended", "informative"])?
        .build();

    tracing::debug!(
        checks = catalog.len(),
        presets = ?catalog.preset_names(),
        "Built builtin catalog"
    );
    Ok(catalog)
}
