use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Filesystem hand-off points between the workflow steps.
///
/// Every entity the workflow touches is a file on disk; no intermediate is
/// held in memory. Re-running the workflow overwrites prior outputs in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Full-atom input trajectory (pre-existing).
    pub input_trajectory: PathBuf,
    /// Stripped trajectory written by the conversion tool.
    pub stripped_trajectory: PathBuf,
    /// Atom index list consumed by the conversion tool.
    pub atom_index_file: PathBuf,
    /// Operator-authored script executed by the visualization tool. Produced
    /// out-of-band; the orchestrator never inspects or edits its content.
    pub structure_script: PathBuf,
    /// PDB file the structure script is expected to produce.
    pub structure_pdb: PathBuf,
    /// Coordinate file written by the topology generator.
    pub coordinate_file: PathBuf,
    /// Topology file written by the topology generator.
    pub topology_file: PathBuf,
    /// Simulation-parameter template consumed by the preprocessor.
    pub parameter_template: PathBuf,
    /// Final binary run-input artifact.
    pub run_input_file: PathBuf,
}

/// Executable names (or paths) for the external collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolsConfig {
    /// Trajectory conversion tool.
    pub trajectory_converter: String,
    /// Molecular visualization program, driven in text display mode.
    pub visualizer: String,
    /// MD engine wrapper providing the topology and preprocessing subcommands.
    pub md_engine: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            trajectory_converter: "mdconvert".to_string(),
            visualizer: "vmd".to_string(),
            md_engine: "gmx".to_string(),
        }
    }
}

/// Chemistry options passed through verbatim to the topology generator.
///
/// The scientific correctness of these choices (protonation states, termini)
/// is a domain decision outside this workflow's control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyOptions {
    /// Ignore hydrogens present in the input structure (`-ignh`).
    pub ignore_hydrogens: bool,
    /// Select terminus types interactively (`-ter`).
    pub interactive_termini: bool,
    /// Additional flags appended verbatim to the topology invocation.
    pub extra_flags: Vec<String>,
    /// Predetermined answers piped to the tool's interactive prompts, one per
    /// line. When `None` the tool inherits the controlling terminal and a
    /// human answers the prompts.
    pub prompt_answers: Option<Vec<String>>,
}

impl Default for TopologyOptions {
    fn default() -> Self {
        Self {
            ignore_hydrogens: true,
            interactive_termini: true,
            extra_flags: Vec::new(),
            prompt_answers: None,
        }
    }
}

/// Immutable configuration for one preparation run.
///
/// Built once at startup via [`PrepConfigBuilder`] and passed by reference
/// into the workflow; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepConfig {
    pub paths: PathsConfig,
    pub tools: ToolsConfig,
    pub topology: TopologyOptions,
    /// Last zero-indexed atom retained when stripping the trajectory. Must
    /// match the atom count the structure script expects downstream; no
    /// automated cross-check is possible here.
    pub last_atom_index: usize,
}

#[derive(Default)]
pub struct PrepConfigBuilder {
    input_trajectory: Option<PathBuf>,
    stripped_trajectory: Option<PathBuf>,
    atom_index_file: Option<PathBuf>,
    structure_script: Option<PathBuf>,
    structure_pdb: Option<PathBuf>,
    coordinate_file: Option<PathBuf>,
    topology_file: Option<PathBuf>,
    parameter_template: Option<PathBuf>,
    run_input_file: Option<PathBuf>,
    tools: Option<ToolsConfig>,
    topology: Option<TopologyOptions>,
    last_atom_index: Option<usize>,
}

impl PrepConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_trajectory(mut self, path: PathBuf) -> Self {
        self.input_trajectory = Some(path);
        self
    }
    pub fn stripped_trajectory(mut self, path: PathBuf) -> Self {
        self.stripped_trajectory = Some(path);
        self
    }
    pub fn atom_index_file(mut self, path: PathBuf) -> Self {
        self.atom_index_file = Some(path);
        self
    }
    pub fn structure_script(mut self, path: PathBuf) -> Self {
        self.structure_script = Some(path);
        self
    }
    pub fn structure_pdb(mut self, path: PathBuf) -> Self {
        self.structure_pdb = Some(path);
        self
    }
    pub fn coordinate_file(mut self, path: PathBuf) -> Self {
        self.coordinate_file = Some(path);
        self
    }
    pub fn topology_file(mut self, path: PathBuf) -> Self {
        self.topology_file = Some(path);
        self
    }
    pub fn parameter_template(mut self, path: PathBuf) -> Self {
        self.parameter_template = Some(path);
        self
    }
    pub fn run_input_file(mut self, path: PathBuf) -> Self {
        self.run_input_file = Some(path);
        self
    }
    pub fn tools(mut self, tools: ToolsConfig) -> Self {
        self.tools = Some(tools);
        self
    }
    pub fn topology_options(mut self, options: TopologyOptions) -> Self {
        self.topology = Some(options);
        self
    }
    pub fn last_atom_index(mut self, index: usize) -> Self {
        self.last_atom_index = Some(index);
        self
    }

    pub fn build(self) -> Result<PrepConfig, ConfigError> {
        let paths = PathsConfig {
            input_trajectory: self
                .input_trajectory
                .ok_or(ConfigError::MissingParameter("input_trajectory"))?,
            stripped_trajectory: self
                .stripped_trajectory
                .ok_or(ConfigError::MissingParameter("stripped_trajectory"))?,
            atom_index_file: self
                .atom_index_file
                .unwrap_or_else(|| PathBuf::from("atom_indices.dat")),
            structure_script: self
                .structure_script
                .ok_or(ConfigError::MissingParameter("structure_script"))?,
            structure_pdb: self
                .structure_pdb
                .ok_or(ConfigError::MissingParameter("structure_pdb"))?,
            coordinate_file: self
                .coordinate_file
                .unwrap_or_else(|| PathBuf::from("conf.gro")),
            topology_file: self
                .topology_file
                .unwrap_or_else(|| PathBuf::from("topol.top")),
            parameter_template: self
                .parameter_template
                .ok_or(ConfigError::MissingParameter("parameter_template"))?,
            run_input_file: self
                .run_input_file
                .unwrap_or_else(|| PathBuf::from("md.tpr")),
        };
        Ok(PrepConfig {
            paths,
            tools: self.tools.unwrap_or_default(),
            topology: self.topology.unwrap_or_default(),
            last_atom_index: self
                .last_atom_index
                .ok_or(ConfigError::MissingParameter("last_atom_index"))?,
        })
    }
}
