//! CLI command implementations
//!
//! This module contains implementations of the commands supported by the
//! CLI application using the Command pattern.

pub mod command_traits;
pub mod transform_command;
pub mod inspect_command;

pub use command_traits::{Command, CommandFactory};
pub use transform_command::TransformCommand;
pub use inspect_command::InspectCommand;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command as ClapCommand};
use log::debug;
use crate::api::MicroTransform;
use crate::coordinate::{Calibration, Point, ReferencePair};
use crate::errors::{TransformError, TransformResult};
use crate::utils::coordinate_utils::parse_coordinate;

/// Build a reference coordinate argument; values may start with '-'
fn reference_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_name("A,B")
        .allow_hyphen_values(true)
        .required(false)
}

/// Build the command-line interface
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("microtransform")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Transform MicroCode UV coordinates into XY from two reference points")
        .arg(
            Arg::new("calibration")
                .short('c')
                .long("calibration")
                .help("TOML file holding the two reference pairs")
                .value_name("FILE")
                .required(false),
        )
        .arg(reference_arg("ref1-xy", "XY position of reference point 1"))
        .arg(reference_arg("ref1-uv", "UV position of reference point 1"))
        .arg(reference_arg("ref2-xy", "XY position of reference point 2"))
        .arg(reference_arg("ref2-uv", "UV position of reference point 2"))
        .arg(
            Arg::new("target")
                .short('t')
                .long("target")
                .help("UV coordinate to transform")
                .value_name("U,V")
                .allow_hyphen_values(true)
                .required_unless_present("inspect"),
        )
        .arg(
            Arg::new("design-constant")
                .long("design-constant")
                .help("Baseline the scale ratio is normalized against")
                .value_name("VALUE")
                .value_parser(value_parser!(f64))
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("inspect")
                .short('i')
                .long("inspect")
                .help("Print the rotation and scale derived from the references")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("unchecked")
                .long("unchecked")
                .help("Propagate degenerate geometry as NaN/inf instead of failing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("precision")
                .short('p')
                .long("precision")
                .help("Digits after the decimal point in the output")
                .value_name("DIGITS")
                .value_parser(value_parser!(usize))
                .default_value("6"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .help("Write a detailed transform report to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log output to this file instead of stderr")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}

/// Factory for creating command instances based on CLI arguments
pub struct MicroTransformCommandFactory;

impl MicroTransformCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        MicroTransformCommandFactory
    }

    /// Build the calibration from a file or from the four reference arguments
    fn calibration_from_args(args: &ArgMatches) -> TransformResult<Calibration> {
        let mut calibration = if let Some(path) = args.get_one::<String>("calibration") {
            Calibration::from_file(path)?
        } else {
            let first = ReferencePair::new(
                Self::required_point(args, "ref1-xy")?,
                Self::required_point(args, "ref1-uv")?,
            );
            let second = ReferencePair::new(
                Self::required_point(args, "ref2-xy")?,
                Self::required_point(args, "ref2-uv")?,
            );
            Calibration::new(first, second)
        };

        if let Some(constant) = args.get_one::<f64>("design-constant") {
            calibration = calibration.with_design_constant(*constant)?;
        }

        debug!("Using calibration {:?}", calibration);
        Ok(calibration)
    }

    fn required_point(args: &ArgMatches, name: &str) -> TransformResult<Point> {
        let value = args.get_one::<String>(name).ok_or_else(|| {
            TransformError::from(format!("Missing --{} (or provide --calibration FILE)", name))
        })?;
        parse_coordinate(value)
    }
}

impl Default for MicroTransformCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for MicroTransformCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> TransformResult<Box<dyn Command>> {
        let calibration = Self::calibration_from_args(args)?;
        let report_file = args.get_one::<String>("report").map(String::as_str);

        let mut api = MicroTransform::new(calibration, report_file)?;
        if args.get_flag("unchecked") {
            api = api.unchecked();
        }

        if args.get_flag("inspect") {
            Ok(Box::new(InspectCommand::new(api)))
        } else {
            Ok(Box::new(TransformCommand::new(args, api)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use crate::errors::Frame;

    const REFERENCE_ARGS: [&str; 8] = [
        "--ref1-xy", "0,0", "--ref1-uv", "0,0",
        "--ref2-xy", "10,0", "--ref2-uv", "0,10",
    ];

    fn matches(extra: &[&str]) -> ArgMatches {
        let mut argv = vec!["microtransform"];
        argv.extend_from_slice(extra);
        build_cli().try_get_matches_from(argv).unwrap()
    }

    fn with_references(extra: &[&str]) -> ArgMatches {
        let mut args = REFERENCE_ARGS.to_vec();
        args.extend_from_slice(extra);
        matches(&args)
    }

    #[test]
    fn test_calibration_from_reference_args() {
        let args = with_references(&["--target", "0,5"]);
        let calibration = MicroTransformCommandFactory::calibration_from_args(&args).unwrap();

        assert_eq!(calibration.first.xy, Point::new(0.0, 0.0));
        assert_eq!(calibration.second.xy, Point::new(10.0, 0.0));
        assert_eq!(calibration.second.uv, Point::new(0.0, 10.0));
        assert_eq!(calibration.design_constant, 0.505);
    }

    #[test]
    fn test_calibration_file_takes_precedence() {
        let path = std::env::temp_dir().join("microtransform_cli_calibration.toml");
        fs::write(&path, "[[reference]]\nxy = [1.0, 2.0]\nuv = [3.0, 4.0]\n\n\
                          [[reference]]\nxy = [5.0, 6.0]\nuv = [7.0, 8.0]\n").unwrap();

        let args = with_references(&["--calibration", path.to_str().unwrap(), "--target", "0,5"]);
        let calibration = MicroTransformCommandFactory::calibration_from_args(&args).unwrap();

        assert_eq!(calibration.first.uv, Point::new(3.0, 4.0));
        assert_eq!(calibration.second.xy, Point::new(5.0, 6.0));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_design_constant_override() {
        let args = with_references(&["--target", "0,5", "--design-constant", "0.25"]);
        let calibration = MicroTransformCommandFactory::calibration_from_args(&args).unwrap();
        assert_eq!(calibration.design_constant, 0.25);
    }

    #[test]
    fn test_invalid_design_constant_is_rejected() {
        let factory = MicroTransformCommandFactory::new();

        for bad in ["0", "-1.0"] {
            for unchecked in [false, true] {
                let mut extra = vec!["--target", "0,5", "--design-constant", bad];
                if unchecked {
                    extra.push("--unchecked");
                }
                let result = factory.create_command(&with_references(&extra));
                assert!(matches!(result, Err(TransformError::CalibrationError(_))),
                        "accepted --design-constant {} (unchecked: {})", bad, unchecked);
            }
        }
    }

    #[test]
    fn test_missing_reference_is_an_error() {
        let args = matches(&["--ref1-xy", "0,0", "--ref1-uv", "0,0", "--ref2-xy", "10,0", "--target", "0,5"]);
        match MicroTransformCommandFactory::new().create_command(&args) {
            Err(TransformError::GenericError(msg)) => assert!(msg.contains("--ref2-uv")),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("command created without --ref2-uv"),
        }
    }

    #[test]
    fn test_target_required_unless_inspecting() {
        let mut argv = vec!["microtransform"];
        argv.extend_from_slice(&REFERENCE_ARGS);
        assert!(build_cli().try_get_matches_from(argv.clone()).is_err());

        argv.push("--inspect");
        assert!(build_cli().try_get_matches_from(argv).is_ok());
    }

    #[test]
    fn test_transform_and_inspect_execute() {
        let factory = MicroTransformCommandFactory::new();

        let command = factory.create_command(&with_references(&["--target", "-2.5,5"])).unwrap();
        assert!(command.execute().is_ok());

        let command = factory.create_command(&with_references(&["--inspect"])).unwrap();
        assert!(command.execute().is_ok());
    }

    #[test]
    fn test_unchecked_lets_degenerate_calibration_through() {
        let degenerate = [
            "--ref1-xy", "0,0", "--ref1-uv", "1,1",
            "--ref2-xy", "10,0", "--ref2-uv", "1,1",
            "--target", "2,3",
        ];
        let factory = MicroTransformCommandFactory::new();

        let checked = factory.create_command(&matches(&degenerate)).unwrap();
        assert!(matches!(checked.execute(), Err(TransformError::DegenerateReference(Frame::UV))));

        let mut args = degenerate.to_vec();
        args.push("--unchecked");
        let unchecked = factory.create_command(&matches(&args)).unwrap();
        assert!(unchecked.execute().is_ok());
    }

    #[test]
    fn test_inspect_rejects_degenerate_calibration() {
        let args = matches(&[
            "--ref1-xy", "0,0", "--ref1-uv", "1,1",
            "--ref2-xy", "10,0", "--ref2-uv", "1,1",
            "--inspect",
        ]);
        let command = MicroTransformCommandFactory::new().create_command(&args).unwrap();
        assert!(command.execute().is_err());
    }
}
