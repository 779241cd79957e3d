//! Sample catalogs for tests.

use docval_core::{Catalog, CatalogBuilder, CheckSource};

use crate::checks::{failing, noisy, passing};

/// A catalog shaped like the production one, with fabricated checks.
///
/// | preset        | checks                 |
/// |---------------|------------------------|
/// | `schema`      | `A`, `X`, `B`          |
/// | `mandatory`   | `M1`, `M2`             |
/// | `optional`    | `O1` (warns)           |
/// | `informative` | `I1` (fails)           |
/// | `basic`       | schema + mandatory     |
/// | `extended`    | basic + optional       |
/// | `full`        | extended + informative |
pub fn sample_catalog() -> Catalog {
    let builder = sources(vec![
        CheckSource::new("schema", vec![passing("A"), passing("X"), passing("B")]),
        CheckSource::new("mandatory", vec![passing("M1"), passing("M2")]),
        CheckSource::new("optional", vec![noisy("O1")]),
        CheckSource::new(
            "informative",
            vec![failing("I1", "/document/title", "title is too short")],
        ),
    ]);

    builder
        .combination("basic", &["schema", "mandatory"])
        .and_then(|b| b.combination("extended", &["basic", "optional"]))
        .and_then(|b| b.combination("full", &["extended", "informative"]))
        .expect("sample combinations reference registered presets")
        .build()
}

/// Register `sources` in order on a fresh builder.
///
/// Panics if a source is invalid; test fixtures are expected to be well formed.
pub fn sources(sources: Vec<CheckSource>) -> CatalogBuilder {
    sources
        .into_iter()
        .fold(Catalog::builder(), |builder, source| {
            builder.source(source).expect("test source must not contain duplicates")
        })
}

/// Catalog made of `sources` only, without combination presets.
pub fn catalog_of(sources_list: Vec<CheckSource>) -> Catalog {
    sources(sources_list).build()
}
