//! Subprocess-backed converter.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use walkdir::WalkDir;

use crate::traits::{ConvertError, ConvertOutput, SpecConverter};

/// Converter that invokes an external command.
///
/// The argument template may contain `{spec}` and `{out}` placeholders,
/// substituted with the spec path and output directory at run time:
///
/// ```
/// use lectern_convert::CommandConverter;
///
/// let converter = CommandConverter::new(
///     "widdershins",
///     ["{spec}", "-o", "{out}/api.md", "--omitHeader"],
/// );
/// assert_eq!(converter.command(), "widdershins");
/// ```
#[derive(Debug, Clone)]
pub struct CommandConverter {
    command: String,
    args: Vec<String>,
}

impl CommandConverter {
    /// Create a converter for the given command and argument template.
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The configured command name.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Substitute `{spec}` and `{out}` placeholders in the argument template.
    fn resolve_args(&self, spec_path: &Path, out_dir: &Path) -> Vec<String> {
        let spec = spec_path.to_string_lossy();
        let out = out_dir.to_string_lossy();

        self.args
            .iter()
            .map(|arg| arg.replace("{spec}", &spec).replace("{out}", &out))
            .collect()
    }
}

impl SpecConverter for CommandConverter {
    fn name(&self) -> &str {
        &self.command
    }

    fn convert(&self, spec_path: &Path, out_dir: &Path) -> Result<ConvertOutput, ConvertError> {
        if !spec_path.exists() {
            return Err(ConvertError::SpecNotFound(spec_path.to_path_buf()));
        }

        fs::create_dir_all(out_dir)?;

        let args = self.resolve_args(spec_path, out_dir);

        tracing::debug!("Running converter: {} {}", self.command, args.join(" "));

        let output = Command::new(&self.command)
            .args(&args)
            .output()
            .map_err(|e| ConvertError::Launch {
                command: self.command.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ConvertError::ToolFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let files = collect_markdown(out_dir);
        if files.is_empty() {
            return Err(ConvertError::EmptyOutput(out_dir.to_path_buf()));
        }

        tracing::info!(
            "Converter {} produced {} file(s)",
            self.command,
            files.len()
        );

        Ok(ConvertOutput { files })
    }
}

/// Collect all Markdown files under a directory, sorted for stable output.
fn collect_markdown(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            matches!(
                e.path().extension().and_then(|x| x.to_str()),
                Some("md") | Some("mdx")
            )
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolves_placeholders() {
        let converter = CommandConverter::new("tool", ["{spec}", "-o", "{out}/api.md", "--flag"]);

        let args = converter.resolve_args(Path::new("/in/openapi.json"), Path::new("/out"));

        assert_eq!(
            args,
            vec!["/in/openapi.json", "-o", "/out/api.md", "--flag"]
        );
    }

    #[test]
    fn errors_on_missing_spec() {
        let temp = tempdir().unwrap();
        let converter = CommandConverter::new("true", Vec::<String>::new());

        let result = converter.convert(Path::new("/nonexistent/spec.json"), temp.path());

        assert!(matches!(result, Err(ConvertError::SpecNotFound(_))));
    }

    #[test]
    fn errors_on_missing_command() {
        let temp = tempdir().unwrap();
        let spec = temp.path().join("openapi.json");
        fs::write(&spec, "{}").unwrap();

        let converter =
            CommandConverter::new("lectern-no-such-converter-binary", Vec::<String>::new());

        let result = converter.convert(&spec, temp.path());

        assert!(matches!(result, Err(ConvertError::Launch { .. })));
    }

    #[test]
    fn errors_on_nonzero_exit() {
        let temp = tempdir().unwrap();
        let spec = temp.path().join("openapi.json");
        fs::write(&spec, "{}").unwrap();

        let converter = CommandConverter::new("false", Vec::<String>::new());

        let result = converter.convert(&spec, temp.path());

        assert!(matches!(result, Err(ConvertError::ToolFailed { .. })));
    }

    #[test]
    fn errors_when_tool_produces_nothing() {
        let temp = tempdir().unwrap();
        let spec = temp.path().join("openapi.json");
        fs::write(&spec, "{}").unwrap();

        // `true` succeeds but writes no Markdown
        let converter = CommandConverter::new("true", Vec::<String>::new());

        let result = converter.convert(&spec, temp.path().join("out").as_path());

        assert!(matches!(result, Err(ConvertError::EmptyOutput(_))));
    }

    #[test]
    fn collects_produced_markdown() {
        let temp = tempdir().unwrap();
        let spec = temp.path().join("openapi.json");
        fs::write(&spec, "{}").unwrap();

        let out = temp.path().join("out");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("api.md"), "# API\n").unwrap();
        fs::write(out.join("notes.txt"), "ignored").unwrap();

        let converter = CommandConverter::new("true", Vec::<String>::new());

        let result = converter.convert(&spec, &out).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].ends_with("api.md"));
    }
}
