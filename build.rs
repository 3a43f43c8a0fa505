// Stages the static site (page, styles, wasm-pack output in static/pkg) into dist/.
use std::{env, fs, path::Path};

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let root = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
    let static_dir = Path::new(&root).join("static");
    let out_dir = Path::new(&root).join("dist");

    if out_dir.exists() {
        fs::remove_dir_all(&out_dir).ok();
    }
    if let Err(e) = fs::create_dir_all(&out_dir) {
        println!("cargo:warning=cannot create dist/: {e}");
        return;
    }

    if static_dir.exists() {
        let options = CopyOptions {
            overwrite: true,
            content_only: true,
            ..CopyOptions::new()
        };
        if let Err(e) = copy(&static_dir, &out_dir, &options) {
            println!("cargo:warning=copying static/ failed: {e}");
        }
    }
}
