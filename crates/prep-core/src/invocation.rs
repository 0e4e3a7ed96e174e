//! Argument-vector construction and execution for the external tools.
//!
//! Each workflow step that shells out is first materialized as an
//! [`Invocation`] value so that path substitution can be inspected and tested
//! without launching anything. The [`ToolRunner`] trait is the execution
//! seam: production code uses [`SystemRunner`], tests record invocations.

use crate::config::PrepConfig;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// One external-tool command, fully resolved: program, argument vector and
/// optionally a block of text to pipe to its standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(mut self, path: &Path) -> Self {
        self.args.push(path.to_string_lossy().into_owned());
        self
    }

    pub fn stdin(mut self, input: String) -> Self {
        self.stdin = Some(input);
        self
    }

    /// The command as it would appear on a shell line, for logs and the
    /// `--show-commands` listing. Not shell-quoted.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Termination state of an external tool, normalized away from the
/// platform-specific [`ExitStatus`]. `code` is `None` when the process was
/// killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    pub code: Option<i32>,
}

impl ToolStatus {
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn signaled() -> Self {
        Self { code: None }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "termination by signal"),
        }
    }
}

impl From<ExitStatus> for ToolStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Executes invocations. Implemented by [`SystemRunner`] in production and by
/// recording doubles in tests.
pub trait ToolRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolStatus>;
}

/// Runs each invocation as a child process, blocking until it exits.
///
/// Standard output and error are inherited so the tools stream directly to
/// the operator's terminal. Standard input is inherited too, except when the
/// invocation carries predetermined prompt answers, which are piped instead.
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolStatus> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);

        let status = match &invocation.stdin {
            Some(input) => {
                command.stdin(Stdio::piped());
                let mut child = command.spawn()?;
                if let Some(mut pipe) = child.stdin.take() {
                    pipe.write_all(input.as_bytes())?;
                }
                // Pipe is closed here so the tool sees EOF after the answers.
                child.wait()?
            }
            None => command.status()?,
        };
        Ok(status.into())
    }
}

/// Step 2: strip the full trajectory down to the atoms listed in the index
/// file.
pub fn strip_trajectory(config: &PrepConfig) -> Invocation {
    Invocation::new(&config.tools.trajectory_converter)
        .path_arg(&config.paths.input_trajectory)
        .arg("-o")
        .path_arg(&config.paths.stripped_trajectory)
        .arg("-a")
        .path_arg(&config.paths.atom_index_file)
}

/// Step 3: run the visualization program in text display mode, executing the
/// operator-authored structure script. The PDB output path is chosen by that
/// script, not by us.
pub fn render_structure(config: &PrepConfig) -> Invocation {
    Invocation::new(&config.tools.visualizer)
        .arg("-dispdev")
        .arg("text")
        .arg("-e")
        .path_arg(&config.paths.structure_script)
}

/// Step 4: generate topology and coordinates from the PDB structure.
///
/// Interactive by nature: the tool may prompt for protonation states or
/// terminus types. When prompt answers are configured they are piped to its
/// stdin; otherwise the call blocks on the human at the terminal.
pub fn generate_topology(config: &PrepConfig) -> Invocation {
    let mut invocation = Invocation::new(&config.tools.md_engine)
        .arg("pdb2gmx")
        .arg("-f")
        .path_arg(&config.paths.structure_pdb)
        .arg("-o")
        .path_arg(&config.paths.coordinate_file)
        .arg("-p")
        .path_arg(&config.paths.topology_file);

    if config.topology.ignore_hydrogens {
        invocation = invocation.arg("-ignh");
    }
    if config.topology.interactive_termini {
        invocation = invocation.arg("-ter");
    }
    for flag in &config.topology.extra_flags {
        invocation = invocation.arg(flag);
    }
    if let Some(answers) = &config.topology.prompt_answers {
        let mut input = answers.join("\n");
        input.push('\n');
        invocation = invocation.stdin(input);
    }
    invocation
}

/// Step 5: assemble the final run-input file from the parameter template,
/// coordinates and topology.
pub fn preprocess_run_input(config: &PrepConfig) -> Invocation {
    Invocation::new(&config.tools.md_engine)
        .arg("grompp")
        .arg("-f")
        .path_arg(&config.paths.parameter_template)
        .arg("-c")
        .path_arg(&config.paths.coordinate_file)
        .arg("-p")
        .path_arg(&config.paths.topology_file)
        .arg("-o")
        .path_arg(&config.paths.run_input_file)
}

/// The four external invocations in workflow order (steps 2 through 5).
pub fn planned(config: &PrepConfig) -> Vec<Invocation> {
    vec![
        strip_trajectory(config),
        render_structure(config),
        generate_topology(config),
        preprocess_run_input(config),
    ]
}
