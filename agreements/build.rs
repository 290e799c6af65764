// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Build Script for facety-agreements
//!
//! Compiles `proto/agreements.proto` into prost messages and tonic stubs for
//! both sides of the `Adoption` and `Receiving` services. The server side is
//! only used by the in-process test servers.
//!
//! A serialized `FileDescriptorSet` is written next to the generated code so
//! that messages can be mapped to and from JSON at runtime (see
//! `src/infrastructure/descriptors.rs`).
//!
//! # Dependencies
//!
//! - **protoc**: Protocol buffer compiler (vendored via `protoc-bin-vendored`)
//! - **tonic-prost-build**: Code generator for Rust gRPC stubs

use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Point prost at the vendored protoc and its well-known type includes
    std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    let well_known = protoc_bin_vendored::include_path()?;

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);

    tonic_prost_build::configure()
        .build_server(true)
        .build_client(true)
        .file_descriptor_set_path(out_dir.join("agreements_descriptor.bin"))
        .compile_protos(
            &[PathBuf::from("proto/agreements.proto")],
            &[PathBuf::from("proto"), well_known],
        )?;

    println!("cargo:rerun-if-changed=proto/agreements.proto");

    Ok(())
}
