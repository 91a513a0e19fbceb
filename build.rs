//! Mongodex build script.

use rustc_version::version_meta;
use rustc_version::Channel::Nightly;

#[doc(hidden)]
fn main() {
    // Backtrace exists in stable, but to use it with std::error::Error,
    // we need to be on the Nightly channel at least.
    if version_meta().unwrap().channel <= Nightly {
        println!("cargo:rustc-cfg=backtrace_support");
    }
}
