//! Pandoc converter gateway.
//!
//! Owns the path to the Pandoc executable and turns conversion requests into
//! Pandoc command lines. Every invocation works on its own scratch files,
//! which are removed when their handles drop, whatever the outcome.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempPath;
use tracing::{debug, info, instrument, warn};

use super::error::{ConversionError, ConversionResult};
use super::footer::{Decoration, FooterPolicy, append_copyright};
use super::format::Format;
use crate::core::config::PandocConfig;

/// Name looked up on `PATH` when no explicit executable is configured.
const PANDOC_BINARY: &str = "pandoc";

const INPUT_PREFIX: &str = "pandoc-input-";
const OUTPUT_PREFIX: &str = "pandoc-output-";

/// Result of a conversion: inline text or the file that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutput {
    Text(String),
    File(PathBuf),
}

/// Arguments for a single Pandoc run.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    pub input_format: Format,
    pub output_format: Format,
    pub output_path: Option<&'a Path>,
    pub footer: Option<&'a Path>,
    pub input_path: &'a Path,
}

impl Invocation<'_> {
    /// Command-line arguments in the order Pandoc expects them:
    /// `-f <in> -t <out> [-o <path>] [--include-after-body <footer>] <input>`.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            self.input_format.pandoc_reader().into(),
            "-t".into(),
            self.output_format.pandoc_writer().into(),
        ];

        if let Some(output) = self.output_path {
            args.push("-o".into());
            args.push(output.into());
        }

        if let Some(footer) = self.footer {
            args.push("--include-after-body".into());
            args.push(footer.into());
        }

        args.push(self.input_path.into());
        args
    }
}

/// Where Pandoc writes its output for a file-producing invocation.
enum OutputTarget {
    /// A path chosen by the caller; it survives the call.
    Caller(PathBuf),
    /// A scratch file that is read back and then deleted.
    Scratch(TempPath),
}

impl OutputTarget {
    fn prepare(format: Format, requested: Option<&Path>) -> ConversionResult<Self> {
        match requested.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => {
                check_destination(format, path)?;
                ensure_parent_dir(path)?;
                Ok(Self::Caller(path.to_path_buf()))
            }
            None if format.is_binary() => {
                Err(ConversionError::OutputRequiresFile(format.to_string()))
            }
            None => scratch_file(OUTPUT_PREFIX, format, None).map(Self::Scratch),
        }
    }

    fn path(&self) -> &Path {
        match self {
            Self::Caller(path) => path.as_path(),
            Self::Scratch(path) => &**path,
        }
    }

    fn finish(self) -> ConversionResult<ConversionOutput> {
        match self {
            Self::Caller(path) => Ok(ConversionOutput::File(path)),
            Self::Scratch(path) => {
                let bytes = fs::read(&path)
                    .map_err(|e| ConversionError::temp_io("read converted output", e))?;
                debug!(operation = "read_output", path = %path.display(), bytes = bytes.len(), "File operation");
                Ok(ConversionOutput::Text(
                    String::from_utf8_lossy(&bytes).into_owned(),
                ))
            }
        }
    }
}

/// Handle to a validated Pandoc executable.
#[derive(Debug, Clone)]
pub struct PandocConverter {
    executable: PathBuf,
    footer: FooterPolicy,
}

impl PandocConverter {
    /// Resolve Pandoc from the configured path or `PATH`, then validate it.
    pub fn locate(config: &PandocConfig) -> ConversionResult<Self> {
        let executable = match &config.executable_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConversionError::ExecutableNotFound(format!(
                        "{} does not exist",
                        path.display()
                    )));
                }
                std::path::absolute(path)
                    .map_err(|e| ConversionError::executable_invalid(path, e.to_string()))?
            }
            None => which::which(PANDOC_BINARY).map_err(|e| {
                ConversionError::ExecutableNotFound(format!(
                    "{PANDOC_BINARY} is not on PATH ({e}), set PANDOC_PATH to the Pandoc executable"
                ))
            })?,
        };

        Self::new(executable, FooterPolicy::from_config(config))
    }

    /// Wrap an explicit executable path after validating it.
    pub fn new(executable: PathBuf, footer: FooterPolicy) -> ConversionResult<Self> {
        validate_executable(&executable)?;
        info!(
            executable = %executable.display(),
            footer = ?footer.template(),
            "Pandoc converter ready"
        );
        Ok(Self { executable, footer })
    }

    /// Path of the Pandoc executable.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Check whether `name` is a supported format.
    pub fn is_supported_format(name: &str) -> bool {
        Format::is_supported(name)
    }

    /// First line of `pandoc --version`.
    pub fn version(&self) -> ConversionResult<String> {
        let output = Command::new(&self.executable)
            .arg("--version")
            .output()
            .map_err(|e| {
                ConversionError::conversion_failed(format!("failed to run pandoc: {e}"), "")
            })?;

        if !output.status.success() {
            return Err(ConversionError::conversion_failed(
                output.status.to_string(),
                combined_output(&output.stdout, &output.stderr),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.lines().next().map(str::trim) {
            Some(line) if !line.is_empty() => Ok(line.to_string()),
            _ => Err(ConversionError::executable_invalid(
                &self.executable,
                "printed no version information",
            )),
        }
    }

    /// Convert inline content and return Pandoc's stdout.
    #[instrument(skip_all, fields(from = %input, to = %output))]
    pub fn convert_text_to_text(
        &self,
        content: &str,
        input: Format,
        output: Format,
    ) -> ConversionResult<String> {
        if output.is_binary() {
            return Err(ConversionError::OutputRequiresFile(output.to_string()));
        }

        let decoration = self.footer.decoration(input, output, false);
        let text = decorate(content, &decoration);
        let source = scratch_file(INPUT_PREFIX, input, Some(text.as_bytes()))?;

        let converted = self.run(&Invocation {
            input_format: input,
            output_format: output,
            output_path: None,
            footer: None,
            input_path: &source,
        })?;

        info!(operation = "convert", from = %input, to = %output, "Converted text to text");
        Ok(converted)
    }

    /// Convert inline content into a file.
    ///
    /// Without `output_file` the result goes to a scratch file whose contents
    /// are returned as text.
    #[instrument(skip_all, fields(from = %input, to = %output, output_file = ?output_file))]
    pub fn convert_text_to_file(
        &self,
        content: &str,
        input: Format,
        output: Format,
        output_file: Option<&Path>,
    ) -> ConversionResult<ConversionOutput> {
        let target = OutputTarget::prepare(output, output_file)?;
        let decoration = self.footer.decoration(input, output, true);
        let text = decorate(content, &decoration);
        let source = scratch_file(INPUT_PREFIX, input, Some(text.as_bytes()))?;

        self.run(&Invocation {
            input_format: input,
            output_format: output,
            output_path: Some(target.path()),
            footer: template_of(&decoration),
            input_path: &source,
        })?;

        info!(
            operation = "convert",
            from = %input,
            to = %output,
            destination = %target.path().display(),
            "Converted text to file"
        );
        target.finish()
    }

    /// Convert an existing file into a file, or into text when no
    /// `output_file` is given.
    #[instrument(skip_all, fields(input_file = %input_file.display(), from = %input, to = %output))]
    pub fn convert_file(
        &self,
        input_file: &Path,
        input: Format,
        output: Format,
        output_file: Option<&Path>,
    ) -> ConversionResult<ConversionOutput> {
        if !input_file.exists() {
            return Err(ConversionError::InputFileNotFound(input_file.to_path_buf()));
        }

        let target = OutputTarget::prepare(output, output_file)?;
        let decoration = self.footer.decoration(input, output, true);

        let augmented = match decoration {
            Decoration::AppendCopyright(block) => {
                // Bytes, not text: Pandoc judges the encoding of the caller's file.
                let mut content =
                    fs::read(input_file).map_err(|e| ConversionError::InputFileUnreadable {
                        path: input_file.to_path_buf(),
                        source: e,
                    })?;
                debug!(operation = "read_input", path = %input_file.display(), bytes = content.len(), "File operation");
                content.extend_from_slice(block.as_bytes());
                Some(scratch_file(INPUT_PREFIX, input, Some(&content))?)
            }
            _ => None,
        };
        let source = augmented.as_deref().unwrap_or(input_file);

        self.run(&Invocation {
            input_format: input,
            output_format: output,
            output_path: Some(target.path()),
            footer: template_of(&decoration),
            input_path: source,
        })?;

        info!(
            operation = "convert",
            from = %input,
            to = %output,
            source = %input_file.display(),
            destination = %target.path().display(),
            "Converted file"
        );
        target.finish()
    }

    /// Run Pandoc and return its stdout.
    ///
    /// There is no timeout: a hung Pandoc process blocks the caller.
    fn run(&self, invocation: &Invocation<'_>) -> ConversionResult<String> {
        let args = invocation.args();
        debug!(executable = %self.executable.display(), ?args, "Running pandoc");

        let output = Command::new(&self.executable)
            .args(&args)
            .output()
            .map_err(|e| {
                ConversionError::conversion_failed(format!("failed to run pandoc: {e}"), "")
            })?;

        if !output.status.success() {
            let combined = combined_output(&output.stdout, &output.stderr);
            warn!(status = %output.status, output = %combined, "Pandoc exited with an error");
            return Err(ConversionError::conversion_failed(
                output.status.to_string(),
                combined,
            ));
        }

        if !output.stderr.is_empty() {
            debug!(stderr = %String::from_utf8_lossy(&output.stderr), "Pandoc diagnostics");
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Check that `path` is a file we are allowed to execute.
fn validate_executable(path: &Path) -> ConversionResult<()> {
    let metadata = fs::metadata(path)
        .map_err(|e| ConversionError::executable_invalid(path, format!("cannot access: {e}")))?;

    if metadata.is_dir() {
        return Err(ConversionError::executable_invalid(
            path,
            "is a directory, not a Pandoc executable",
        ));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(ConversionError::executable_invalid(path, "is not executable"));
        }
    }

    Ok(())
}

/// Pandoc picks some renderers from the output file name alone, so the
/// destination must carry the extension such formats demand.
fn check_destination(format: Format, path: &Path) -> ConversionResult<()> {
    let Some(expected) = format.required_extension() else {
        return Ok(());
    };

    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected));

    if matches {
        Ok(())
    } else {
        Err(ConversionError::OutputExtensionMismatch {
            format: format.to_string(),
            extension: expected.to_string(),
            path: path.to_path_buf(),
        })
    }
}

/// Create the parent directory of an output path if needed.
fn ensure_parent_dir(path: &Path) -> ConversionResult<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    fs::create_dir_all(parent).map_err(|e| {
        ConversionError::temp_io(format!("create output directory {}", parent.display()), e)
    })?;
    debug!(operation = "create_dir", path = %parent.display(), "File operation");
    Ok(())
}

/// Create a scratch file named after `format`, optionally filled with `content`.
fn scratch_file(prefix: &str, format: Format, content: Option<&[u8]>) -> ConversionResult<TempPath> {
    let suffix = format!(".{}", format.extension());
    let mut file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(&suffix)
        .tempfile()
        .map_err(|e| ConversionError::temp_io("create temporary file", e))?;

    if let Some(content) = content {
        file.write_all(content)
            .and_then(|()| file.flush())
            .map_err(|e| ConversionError::temp_io("write temporary file", e))?;
    }

    let path = file.into_temp_path();
    debug!(operation = "create_temp", path = %path.display(), "File operation");
    Ok(path)
}

fn decorate<'a>(content: &'a str, decoration: &Decoration<'_>) -> std::borrow::Cow<'a, str> {
    match decoration {
        Decoration::AppendCopyright(block) => append_copyright(content, block).into(),
        _ => content.into(),
    }
}

fn template_of<'a>(decoration: &Decoration<'a>) -> Option<&'a Path> {
    match decoration {
        Decoration::IncludeTemplate(path) => Some(path),
        _ => None,
    }
}

fn combined_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(stderr));
    combined
}
