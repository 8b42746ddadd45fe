/*! Integration tests for headerlist.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - list: Tests for PropertyList (ordering, comments, combine, copy, visitors, serde)
 * - set: Tests for PropertySet (dotted paths, name listings) and its use as a source
 * - value: Tests for Value conversions and coercions
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("headerlist=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod list;
mod value;
