/*! Integration tests for livetree.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * - path: Path parsing and joining
 * - navigation: get / get_or / get_only / set / del / is_path on a root node
 * - aliasing: Child views sharing storage with their ancestors, and copies that do not
 * - dispatch: Stored callables and registry extensions
 * - builtins: The built-in array extensions
 * - protocol: Counting, iteration and indexed access
 * - serialization: JSON import and export
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("livetree=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod aliasing;
mod dispatch;
mod protocol;
