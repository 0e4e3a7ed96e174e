use crate::cli::PrepareArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use trajprep::config::{PrepConfig, PrepConfigBuilder, ToolsConfig, TopologyOptions};

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPaths {
    #[serde(rename = "input-trajectory")]
    input_trajectory: Option<PathBuf>,
    #[serde(rename = "stripped-trajectory")]
    stripped_trajectory: Option<PathBuf>,
    #[serde(rename = "atom-index-file")]
    atom_index_file: Option<PathBuf>,
    #[serde(rename = "structure-script")]
    structure_script: Option<PathBuf>,
    #[serde(rename = "structure-pdb")]
    structure_pdb: Option<PathBuf>,
    #[serde(rename = "coordinate-file")]
    coordinate_file: Option<PathBuf>,
    #[serde(rename = "topology-file")]
    topology_file: Option<PathBuf>,
    #[serde(rename = "parameter-template")]
    parameter_template: Option<PathBuf>,
    #[serde(rename = "run-input-file")]
    run_input_file: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialTools {
    #[serde(rename = "trajectory-converter")]
    trajectory_converter: Option<String>,
    visualizer: Option<String>,
    #[serde(rename = "md-engine")]
    md_engine: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialTopology {
    #[serde(rename = "ignore-hydrogens")]
    ignore_hydrogens: Option<bool>,
    #[serde(rename = "interactive-termini")]
    interactive_termini: Option<bool>,
    #[serde(rename = "extra-flags")]
    extra_flags: Option<Vec<String>>,
    #[serde(rename = "prompt-answers")]
    prompt_answers: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialPrepConfig {
    paths: Option<PartialPaths>,
    tools: Option<PartialTools>,
    topology: Option<PartialTopology>,
    #[serde(rename = "last-atom-index")]
    last_atom_index: Option<usize>,
}

impl PartialPrepConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn merge_with_cli(mut self, args: &PrepareArgs) -> Result<PrepConfig> {
        let paths = self.paths.take().unwrap_or_default();
        let tools = self.tools.take().unwrap_or_default();
        let topology = self.topology.take().unwrap_or_default();

        let mut builder = PrepConfigBuilder::new();

        if let Some(path) = args.input.clone().or(paths.input_trajectory) {
            builder = builder.input_trajectory(path);
        }
        if let Some(path) = args.output.clone().or(paths.stripped_trajectory) {
            builder = builder.stripped_trajectory(path);
        }
        if let Some(path) = paths.atom_index_file {
            builder = builder.atom_index_file(path);
        }
        if let Some(path) = paths.structure_script {
            builder = builder.structure_script(path);
        }
        if let Some(path) = paths.structure_pdb {
            builder = builder.structure_pdb(path);
        }
        if let Some(path) = paths.coordinate_file {
            builder = builder.coordinate_file(path);
        }
        if let Some(path) = paths.topology_file {
            builder = builder.topology_file(path);
        }
        if let Some(path) = paths.parameter_template {
            builder = builder.parameter_template(path);
        }
        if let Some(path) = paths.run_input_file {
            builder = builder.run_input_file(path);
        }
        if let Some(index) = args.last_atom.or(self.last_atom_index) {
            builder = builder.last_atom_index(index);
        }

        let tool_defaults = ToolsConfig::default();
        builder = builder.tools(ToolsConfig {
            trajectory_converter: tools
                .trajectory_converter
                .unwrap_or(tool_defaults.trajectory_converter),
            visualizer: tools.visualizer.unwrap_or(tool_defaults.visualizer),
            md_engine: tools.md_engine.unwrap_or(tool_defaults.md_engine),
        });

        let topology_defaults = TopologyOptions::default();
        builder = builder.topology_options(TopologyOptions {
            ignore_hydrogens: topology
                .ignore_hydrogens
                .unwrap_or(topology_defaults.ignore_hydrogens),
            interactive_termini: topology
                .interactive_termini
                .unwrap_or(topology_defaults.interactive_termini),
            extra_flags: topology.extra_flags.unwrap_or_default(),
            prompt_answers: topology.prompt_answers,
        });

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }
}
