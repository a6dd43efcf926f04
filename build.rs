use std::env;
use std::io;
use std::path::Path;

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=src/wap.js");

    let out_dir = env::var("OUT_DIR").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    // remove build/wap-counter-XXXXXXX/out
    let dest_dir = Path::new(&out_dir)
        .ancestors()
        .nth(3)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR too shallow"))?;
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    let src_path = Path::new(&manifest_dir).join("src").join("wap.js");
    std::fs::copy(&src_path, dest_dir.join("wap.js"))?;
    Ok(())
}
