//! m2sl command-line converter
//!
//! Converts an OBJ mesh and its MTL materials into a COLLADA document.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rig_convert::config::Config;
use rig_convert::core::config::ConvertConfig;
use rig_convert::foundation::logging;
use rig_convert::{ConversionPipeline, ConvertError, ConvertReport, ConvertRequest};

/// Convert a Wavefront OBJ mesh into a COLLADA 1.4.1 document
#[derive(Debug, Parser)]
#[command(name = "m2sl", version)]
struct Args {
    /// OBJ file to convert
    input: PathBuf,

    /// MTL file holding the mesh's materials
    material_library: Option<PathBuf>,

    /// Destination path (defaults to the input path with the configured suffix)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (.toml or .ron)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Re-read the written document and check its triangle set
    #[arg(long)]
    verify: bool,
}

fn load_config(args: &Args) -> Result<ConvertConfig, ConvertError> {
    let mut config = match &args.config {
        Some(path) => ConvertConfig::load_from_file(path)?,
        None => ConvertConfig::default(),
    };
    if args.verify {
        config = config.with_verify(true);
    }
    config.validate()?;
    Ok(config)
}

fn convert(args: &Args, config: ConvertConfig) -> Result<ConvertReport, ConvertError> {
    let mut request = ConvertRequest::new(&args.input);
    if let Some(mtl) = &args.material_library {
        request = request.with_material_library(mtl);
    }
    if let Some(output) = &args.output {
        request = request.with_output(output);
    }

    ConversionPipeline::new(config)?.run(&request)
}

fn exit_status(error: &ConvertError) -> u8 {
    u8::try_from(error.kind().exit_code()).unwrap_or(1)
}

fn fail(error: &ConvertError) -> ExitCode {
    eprintln!("m2sl: {error}");
    ExitCode::from(exit_status(error))
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logging is configured by the file being loaded, so failures here go to stderr only
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };
    logging::init(&config.logging.level);

    match convert(&args, config) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Conversion of {} failed: {e}", args.input.display());
            fail(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig_convert::core::config::BoneConfig;
    use rig_convert::ErrorKind;
    use std::fs;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_arguments() {
        let parsed = args(&["m2sl", "hero.obj", "hero.mtl", "-o", "out.dae", "--verify"]);
        assert_eq!(parsed.input, PathBuf::from("hero.obj"));
        assert_eq!(parsed.material_library, Some(PathBuf::from("hero.mtl")));
        assert_eq!(parsed.output, Some(PathBuf::from("out.dae")));
        assert!(parsed.verify);
        assert!(Args::try_parse_from(["m2sl"]).is_err());
    }

    #[test]
    fn test_bad_config_fails_before_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("settings.json");
        fs::write(&config, "{}").unwrap();
        let config = config.to_string_lossy().into_owned();

        let err = load_config(&args(&["m2sl", "hero.obj", "-c", &config])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(exit_status(&err), 6);
    }

    #[test]
    fn test_bone_list_mismatch_fails_during_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hero.obj");
        fs::write(&input, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        fs::write(dir.path().join("in.ini"), "a\nb\n").unwrap();
        fs::write(dir.path().join("out.ini"), "x\n").unwrap();

        let config_path = dir.path().join("m2sl.toml");
        ConvertConfig::default()
            .with_bones(BoneConfig {
                discovered_list: Some(dir.path().join("found.ini")),
                input_list: dir.path().join("in.ini"),
                output_list: dir.path().join("out.ini"),
            })
            .save_to_file(&config_path)
            .unwrap();

        let input = input.to_string_lossy().into_owned();
        let config_path = config_path.to_string_lossy().into_owned();
        let parsed = args(&["m2sl", &input, "-c", &config_path]);

        let config = load_config(&parsed).unwrap();
        let err = convert(&parsed, config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(exit_status(&err), 6);
    }
}
