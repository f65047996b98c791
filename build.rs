use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=config.toml");

    // OUT_DIR is target/<profile>/build/<pkg>/out; the binary lives three levels up
    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };
    let Some(bin_dir) = Path::new(&out_dir).ancestors().nth(3) else {
        return;
    };

    // Ship the default config next to the binary
    if let Err(e) = fs::copy("config.toml", bin_dir.join("config.toml")) {
        println!("cargo:warning=could not copy config.toml: {}", e);
    }
}
