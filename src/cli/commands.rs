//! CLI command implementations.
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::driver::{generate, FileConfig, GenerationOutcome};
use crate::backend::error::GenerationError;
use crate::frontend::ast::Program;
use crate::frontend::diagnostics::Reporter;
use crate::targets::Target;

use super::{CliError, CliResult, ExitCode};

/// Maximum program model file size (16 MB).
///
/// Model files larger than this are rejected to prevent out-of-memory
/// conditions while deserializing.
const MAX_MODEL_SIZE: u64 = 16 * 1024 * 1024;

/// Generate code for a program model file, optionally compiling it.
pub fn build_file(
    model_path: &Path,
    target: Target,
    src_gen_dir: Option<PathBuf>,
    bin_dir: Option<PathBuf>,
    no_compile: bool,
) -> CliResult<ExitCode> {
    let mut program = load_program(model_path)?;
    if no_compile {
        program.properties.no_compile = true;
    }

    let files = output_layout(model_path, src_gen_dir, bin_dir)?;
    let mut reporter = Reporter::new();

    match generate(&program, &mut reporter, &files, target) {
        Ok(GenerationOutcome::NoMainReactor) => {
            println!(
                "WARNING: the program model does not define a main reactor; no code was generated"
            );
            Ok(ExitCode::SUCCESS)
        }
        Ok(GenerationOutcome::SkippedCompile { src_dir }) => {
            for diagnostic in reporter.diagnostics() {
                eprintln!("{diagnostic}");
            }
            println!("Exiting before invoking target compiler.");
            println!("Generated source code is in {}", src_dir.display());
            Ok(ExitCode::SUCCESS)
        }
        Ok(GenerationOutcome::Compiled { src_dir, bin_dir }) => {
            println!("SUCCESS (compiling generated {target} code)");
            println!("Generated source code is in {}", src_dir.display());
            println!("Compiled binary is in {}", bin_dir.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(GenerationError::ToolchainFailed { tool, code, stderr }) => {
            if !stderr.is_empty() {
                eprint!("{stderr}");
            }
            Err(CliError::failure(format!("{tool} failed with error code {code}")))
        }
        Err(e) => Err(CliError::failure(e.to_string())),
    }
}

/// Deserialize a validated program model from a JSON file.
///
/// ## Errors
///
/// Returns an error if the file cannot be read, exceeds `MAX_MODEL_SIZE`,
/// or is not a valid program model.
pub fn load_program(path: &Path) -> CliResult<Program> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access model '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_MODEL_SIZE {
        return Err(CliError::failure(format!(
            "Model file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_MODEL_SIZE
        )));
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading model '{}': {}", path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| CliError::failure(format!("Invalid program model '{}': {}", path.display(), e)))
}

/// Resolve the output directory layout, defaulting next to the model file's
/// stem under `target/rill/`.
fn output_layout(
    model_path: &Path,
    src_gen_dir: Option<PathBuf>,
    bin_dir: Option<PathBuf>,
) -> CliResult<FileConfig> {
    let stem = model_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("rill_app");

    let src_gen_dir =
        src_gen_dir.unwrap_or_else(|| PathBuf::from(format!("target/rill/{stem}/src-gen")));
    let bin_dir = bin_dir.unwrap_or_else(|| PathBuf::from(format!("target/rill/{stem}/bin")));

    validate_output_dir(&src_gen_dir)?;
    validate_output_dir(&bin_dir)?;

    Ok(FileConfig { src_gen_dir, bin_dir })
}

/// Validate an output directory to prevent path traversal.
fn validate_output_dir(dir: &Path) -> CliResult<()> {
    for component in dir.components() {
        if let std::path::Component::ParentDir = component {
            return Err(CliError::failure(format!(
                "Output directory '{}' contains path traversal (..)",
                dir.display()
            )));
        }
    }

    if dir.is_absolute() {
        tracing::warn!(
            "Using absolute output path: {}. Consider using a relative path.",
            dir.display()
        );
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn output_layout_defaults_follow_the_model_stem() {
        let files = output_layout(Path::new("demo/traffic_light.json"), None, None).unwrap();
        assert_eq!(
            files.src_gen_dir,
            PathBuf::from("target/rill/traffic_light/src-gen")
        );
        assert_eq!(files.bin_dir, PathBuf::from("target/rill/traffic_light/bin"));
    }

    #[test]
    fn traversal_in_output_dirs_is_rejected() {
        let err = output_layout(
            Path::new("model.json"),
            Some(PathBuf::from("../outside")),
            None,
        )
        .unwrap_err();
        assert!(err.message.contains("path traversal"));
    }

    #[test]
    fn missing_model_file_is_a_cli_error() {
        let err = load_program(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.message.contains("Cannot access model"));
    }

    #[test]
    fn malformed_model_is_a_cli_error() {
        let path = std::env::temp_dir().join(format!("rillc_bad_model_{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let err = load_program(&path).unwrap_err();
        assert!(err.message.contains("Invalid program model"));
        let _ = fs::remove_file(&path);
    }
}
