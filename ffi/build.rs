use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    println!("cargo:rerun-if-changed=src");

    let out = crate_dir.join("include").join("vast_client.h");
    let generated = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("VAST_CLIENT_H")
        .generate();

    match generated {
        Ok(bindings) => {
            if let Err(e) = std::fs::create_dir_all(crate_dir.join("include")) {
                println!("cargo:warning=cannot create include dir: {e}");
                return;
            }
            bindings.write_to_file(out);
        }
        Err(e) => println!("cargo:warning=header generation skipped: {e}"),
    }
}
