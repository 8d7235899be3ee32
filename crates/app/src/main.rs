//! Entry point for stl2obj: binary STL to OBJ conversion.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use meshio::mesh::AxisConvention;
use meshio::{obj, stl};

fn parse_up_axis_arg() -> AxisConvention {
    // Accept: --up-axis=y|z. Default z: CAD-style Z-up input is remapped
    // to a Y-up consumer convention, matching what most STL sources need.
    let mut convention = AxisConvention::ZUp;
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--up-axis=") {
            convention = match val.to_ascii_lowercase().as_str() {
                "y" => AxisConvention::YUp,
                "z" => AxisConvention::ZUp,
                other => {
                    eprintln!("[warn] Unknown up axis '{}', falling back to z.", other);
                    AxisConvention::ZUp
                }
            };
        }
    }
    convention
}

fn parse_dump_arg() -> bool {
    std::env::args().any(|arg| arg == "--dump")
}

fn parse_path_args() -> Result<(PathBuf, PathBuf)> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;

    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--input=") {
            input = Some(PathBuf::from(val));
        } else if let Some(val) = arg.strip_prefix("--output=") {
            output = Some(PathBuf::from(val));
        }
    }

    let Some(input) = input else {
        bail!("Usage: stl2obj --input=FILE.stl [--output=FILE.obj] [--up-axis=y|z] [--dump]");
    };
    let output = output.unwrap_or_else(|| input.with_extension("obj"));
    Ok((input, output))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (input, output) = parse_path_args()?;
    let convention = parse_up_axis_arg();
    log::info!(
        "Converting {} -> {} (convention: {:?})",
        input.display(),
        output.display(),
        convention
    );

    // Read-all-then-write-all: the input handle is dropped inside the
    // reader before the output file is created.
    let mesh = stl::read_stl_from_path(&input)?;
    log::info!("Decoded {} triangles", mesh.triangle_count());
    if parse_dump_arg() {
        mesh.log_triangles();
    }

    obj::write_obj_to_path(&mesh, convention, &output)
        .with_context(|| format!("Failed to write OBJ file: {}", output.display()))?;
    log::info!("Wrote {}", output.display());

    Ok(())
}
