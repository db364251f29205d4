//! Build script for headliner-storage.
//!
//! Rebuild when database migrations change.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
