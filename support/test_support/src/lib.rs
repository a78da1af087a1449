use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseClass {
    TranslateSuccess,
    FrontendError,
    UnsupportedConstruct,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExpectedOutcome {
    pub exit_code: i32,
    pub c_file: Option<String>,
    pub stdout_file: Option<String>,
    pub stderr_contains_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaseSpec {
    pub class: CaseClass,
    /// Compile the emitted C and compare its stdout with `stdout_file`.
    #[serde(default)]
    pub parity: bool,
    pub expected: ExpectedOutcome,
}

#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub dir: PathBuf,
    pub program_path: PathBuf,
    pub spec: CaseSpec,
}

impl Case {
    pub fn read_text(&self, relative_path: &str) -> Result<String> {
        fs::read_to_string(self.dir.join(relative_path))
            .with_context(|| format!("Reading {} fixture file {}", self.name, relative_path))
    }
}

pub fn load_cases(programs_dir: &Path) -> Result<Vec<Case>> {
    let mut cases = Vec::new();

    for entry in
        fs::read_dir(programs_dir).with_context(|| format!("Reading {}", programs_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }

        let case_path = path.join("case.yaml");
        if !case_path.exists() {
            continue;
        }

        let program_path = path.join("program.py");
        ensure!(
            program_path.exists(),
            "Missing program.py for case {}",
            path.display()
        );

        let case_name = path
            .file_name()
            .and_then(|value| value.to_str())
            .map(str::to_string)
            .with_context(|| format!("Invalid case directory name {}", path.display()))?;
        let case_raw = fs::read_to_string(&case_path)
            .with_context(|| format!("Reading {}", case_path.display()))?;
        let spec: CaseSpec = serde_yaml::from_str(&case_raw)
            .with_context(|| format!("Parsing {}", case_path.display()))?;

        cases.push(Case {
            name: case_name,
            dir: path,
            program_path,
            spec,
        });
    }

    ensure!(
        !cases.is_empty(),
        "No test cases found in {}",
        programs_dir.display()
    );
    cases.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(cases)
}

pub fn normalize_output(output: &str) -> String {
    output.replace("\r\n", "\n").trim_end().to_string()
}

/// Finds a working C compiler, honouring `CC` first.
pub fn detect_c_compiler() -> Option<String> {
    let candidates = std::env::var("CC")
        .ok()
        .into_iter()
        .chain(["cc", "gcc", "clang"].map(str::to_string));
    for candidate in candidates {
        let runs = Command::new(&candidate)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false);
        if runs {
            return Some(candidate);
        }
    }
    None
}

/// Compiles `source` with `compiler` into a scratch directory, runs the
/// binary and returns its stdout. The scratch directory is removed on every
/// path, including failed compilation.
pub fn compile_and_run_c(compiler: &str, name: &str, source: &str) -> Result<String> {
    compile_and_run_c_in(&std::env::temp_dir(), compiler, name, source)
}

/// Like [`compile_and_run_c`], with the scratch directory created under `parent`.
pub fn compile_and_run_c_in(
    parent: &Path,
    compiler: &str,
    name: &str,
    source: &str,
) -> Result<String> {
    let scratch = tempfile::Builder::new()
        .prefix("py2c-")
        .tempdir_in(parent)
        .with_context(|| format!("Creating scratch directory in {}", parent.display()))?;
    let source_path = scratch.path().join(format!("{name}.c"));
    let binary_path = scratch.path().join(name);
    fs::write(&source_path, source)
        .with_context(|| format!("Writing {}", source_path.display()))?;

    let compiled = Command::new(compiler)
        .arg("-std=c99")
        .arg("-w")
        .arg(&source_path)
        .arg("-o")
        .arg(&binary_path)
        .output()
        .with_context(|| format!("Running {compiler}"))?;
    ensure!(
        compiled.status.success(),
        "C compilation failed for {name}: {}",
        String::from_utf8_lossy(&compiled.stderr)
    );

    let run = Command::new(&binary_path)
        .output()
        .with_context(|| format!("Running {}", binary_path.display()))?;
    Ok(String::from_utf8_lossy(&run.stdout).to_string())
}

pub fn run_python_startup(interpreter: &str) -> Result<()> {
    let status = Command::new(interpreter)
        .arg("-c")
        .arg("pass")
        .status()
        .with_context(|| format!("Running '{interpreter} -c pass'"))?;
    ensure!(status.success(), "python startup command failed");
    Ok(())
}

pub fn run_python_file(interpreter: &str, path: &Path) -> Result<String> {
    let output = Command::new(interpreter)
        .arg(path)
        .output()
        .with_context(|| format!("Running python file {}", path.display()))?;
    ensure!(
        output.status.success(),
        "python failed for {}: {}",
        path.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_compilation_leaves_no_scratch_files() -> Result<()> {
        let Some(compiler) = detect_c_compiler() else {
            eprintln!("Skipping: no C compiler found.");
            return Ok(());
        };
        let parent = tempfile::tempdir()?;

        let result = compile_and_run_c_in(parent.path(), &compiler, "broken", "int main( {");
        assert!(result.is_err());
        assert_eq!(fs::read_dir(parent.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn successful_run_cleans_up_and_returns_stdout() -> Result<()> {
        let Some(compiler) = detect_c_compiler() else {
            eprintln!("Skipping: no C compiler found.");
            return Ok(());
        };
        let parent = tempfile::tempdir()?;
        let source = "#include <stdio.h>\nint main()\n{\nprintf(\"hi\\n\");\n}\n";

        let stdout = compile_and_run_c_in(parent.path(), &compiler, "hello", source)?;
        assert_eq!(stdout, "hi\n");
        assert_eq!(fs::read_dir(parent.path())?.count(), 0);
        Ok(())
    }
}
