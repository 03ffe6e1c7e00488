//! Retrieves information about the version of the binary from Git and the
//! build environment. Git metadata is generated by `shadow-rs`, the target
//! triple is written to a file in the output directory and both can be
//! accessed at runtime.

use std::error::Error;
use std::path::Path;
use std::{env, fs};

fn generate_file(filename: &str, contents: &str) -> Result<(), Box<dyn Error>> {
    let out_dir = env::var_os("OUT_DIR").ok_or("OUT_DIR is not set")?;
    fs::write(Path::new(&out_dir).join(filename), contents)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    generate_file("target", &env::var("TARGET")?)?;
    shadow_rs::new().map_err(|e| e.to_string())?;
    Ok(())
}
