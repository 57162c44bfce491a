//! Build script for turf-firmware
//!
//! - Links the Xilinx standalone BSP (libxil) and the board platform code
//! - Passes the BSP linker script through to the final link

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TURF_BSP_DIR");

    // Host builds (cargo check on the workspace) have no BSP to link
    let target = env::var("TARGET").unwrap_or_default();
    if !target.starts_with("armv7a") {
        return;
    }

    let bsp_dir = match env::var("TURF_BSP_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: TURF_BSP_DIR not set!                                    ║\n\
            ║                                                                  ║\n\
            ║  Point it at the exported standalone BSP directory containing   ║\n\
            ║  lib/libxil.a, lib/libturfplatform.a and lscript.ld.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        ),
    };

    let lib_dir = bsp_dir.join("lib");
    let lscript = bsp_dir.join("lscript.ld");
    if !lscript.exists() {
        panic!("linker script not found at {}", lscript.display());
    }

    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    println!("cargo:rustc-link-lib=static=turfplatform");
    println!("cargo:rustc-link-lib=static=xil");
    println!("cargo:rustc-link-arg=-T{}", lscript.display());
    println!("cargo:rerun-if-changed={}", lscript.display());
}
