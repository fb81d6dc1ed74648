fn main() {
    // memory.x sits next to this crate's Cargo.toml, cortex-m-rt's link.x includes it
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-link-search={}", std::env::var("CARGO_MANIFEST_DIR").unwrap());
}
