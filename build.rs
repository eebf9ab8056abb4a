// build.rs

use std::env;

const DEFAULT_LIB_NAME: &str = "forkit";

fn main() {
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_FORKIT");
    println!("cargo:rerun-if-env-changed=FORKIT_LIB_DIR");
    println!("cargo:rerun-if-env-changed=FORKIT_LIB_NAME");

    if env::var_os("CARGO_FEATURE_FORKIT").is_none() {
        return;
    }

    let name = env::var("FORKIT_LIB_NAME").unwrap_or_else(|_| DEFAULT_LIB_NAME.to_string());
    if let Some(dir) = env::var_os("FORKIT_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
        println!("cargo:rustc-link-lib={name}");
        return;
    }

    match pkg_config::Config::new().probe(&name) {
        Ok(_) => {}
        Err(_) => {
            // The final link (e.g. the C++ harness pulling in the staticlib)
            // has to provide the symbol instead.
            println!(
                "cargo:warning=lib{name} not found; forkit_main must be resolved by the final link"
            );
        }
    }
}
