//! Command-line tube export: PDB C-alpha trace in, Wavefront OBJ out.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use viso_tube::error::TubeError;
use viso_tube::export::write_obj;
use viso_tube::options::Options;
use viso_tube::pipeline::TubePipeline;
use viso_tube::structure::{load_ca_trace, normalize_to_unit_cube};

const USAGE: &str =
    "Usage: viso-tube <structure.pdb> [out.obj] [--preset file.toml]";

struct Args {
    structure: PathBuf,
    output: PathBuf,
    preset: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut preset = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--preset" {
            let path = args.next().ok_or("--preset needs a file argument")?;
            preset = Some(PathBuf::from(path));
        } else if arg.starts_with("--") {
            return Err(format!("unknown flag {arg}"));
        } else {
            positional.push(PathBuf::from(arg));
        }
    }

    let mut positional = positional.into_iter();
    let structure = positional.next().ok_or("missing structure path")?;
    let output = positional
        .next()
        .unwrap_or_else(|| structure.with_extension("obj"));
    if positional.next().is_some() {
        return Err("too many arguments".to_owned());
    }
    Ok(Args {
        structure,
        output,
        preset,
    })
}

fn run(args: &Args) -> Result<(), TubeError> {
    let options = match &args.preset {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let pipeline = TubePipeline::new(&options)?;

    let mut trace = load_ca_trace(&args.structure)?;
    log::info!(
        "Loaded {} CA atoms from {}",
        trace.len(),
        args.structure.display()
    );
    if options.structure.normalize {
        trace = normalize_to_unit_cube(&trace);
    }

    let geometry = pipeline.run(&trace)?;
    log::info!(
        "Generated {} curve samples, {} side triangles, {} cap triangles",
        geometry.curve.len(),
        geometry.mesh.triangle_count(),
        geometry.mesh.cap_triangle_count()
    );

    write_mesh(&geometry.mesh, &args.output)?;
    log::info!("Wrote {}", args.output.display());
    Ok(())
}

fn write_mesh(
    mesh: &viso_tube::geometry::TubeMesh,
    path: &Path,
) -> Result<(), TubeError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!("{USAGE}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
