use crate::config::PrepConfig;
use crate::error::PrepError;
use crate::index;
use crate::invocation::{self, Invocation, ToolRunner};
use crate::progress::{Progress, ProgressReporter};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

pub const STEP_COUNT: usize = 5;

const STEP_INDEX_LIST: (usize, &str) = (1, "atom index list");
const STEP_STRIP: (usize, &str) = (2, "strip trajectory");
const STEP_STRUCTURE: (usize, &str) = (3, "generate structure");
const STEP_TOPOLOGY: (usize, &str) = (4, "generate topology");
const STEP_PREPROCESS: (usize, &str) = (5, "preprocess run input");

/// Runs the full preparation sequence against `runner`.
///
/// Steps run strictly in order; step k+1 is never launched before step k has
/// returned control. Each external step is verified twice: the tool must exit
/// successfully, and every file the next steps depend on must exist
/// afterwards. The first violation aborts the workflow with an error naming
/// the step.
///
/// Input files are deliberately not checked before a step launches; a missing
/// input is the consuming tool's failure to report, and surfaces through the
/// exit-status check.
#[instrument(skip_all, name = "prepare_workflow")]
pub fn run(
    config: &PrepConfig,
    runner: &dyn ToolRunner,
    reporter: &ProgressReporter,
) -> Result<(), PrepError> {
    info!(
        last_atom_index = config.last_atom_index,
        input = %config.paths.input_trajectory.display(),
        "Starting run-input preparation."
    );

    reporter.report(Progress::StepStart {
        index: STEP_INDEX_LIST.0,
        name: STEP_INDEX_LIST.1,
        total: STEP_COUNT,
    });
    index::write_index_file(
        &config.paths.atom_index_file,
        config.last_atom_index,
        STEP_INDEX_LIST,
    )?;
    debug!(
        path = %config.paths.atom_index_file.display(),
        atoms = config.last_atom_index + 1,
        "Atom index list written."
    );
    reporter.report(Progress::StepFinish);

    execute_step(
        runner,
        reporter,
        STEP_STRIP,
        invocation::strip_trajectory(config),
        vec![config.paths.stripped_trajectory.clone()],
    )?;

    execute_step(
        runner,
        reporter,
        STEP_STRUCTURE,
        invocation::render_structure(config),
        vec![config.paths.structure_pdb.clone()],
    )?;

    if config.topology.prompt_answers.is_none() {
        reporter.report(Progress::Message(
            "Topology tool may prompt for input; answer on this terminal.".to_string(),
        ));
    }
    execute_step(
        runner,
        reporter,
        STEP_TOPOLOGY,
        invocation::generate_topology(config),
        vec![
            config.paths.coordinate_file.clone(),
            config.paths.topology_file.clone(),
        ],
    )?;

    execute_step(
        runner,
        reporter,
        STEP_PREPROCESS,
        invocation::preprocess_run_input(config),
        vec![config.paths.run_input_file.clone()],
    )?;

    info!(
        run_input = %config.paths.run_input_file.display(),
        "Preparation workflow complete."
    );
    Ok(())
}

fn execute_step(
    runner: &dyn ToolRunner,
    reporter: &ProgressReporter,
    step: (usize, &'static str),
    invocation: Invocation,
    required_outputs: Vec<PathBuf>,
) -> Result<(), PrepError> {
    let (index, name) = step;
    reporter.report(Progress::StepStart {
        index,
        name,
        total: STEP_COUNT,
    });
    info!(step = index, command = %invocation.command_line(), "Launching external tool.");

    let status = runner
        .run(&invocation)
        .map_err(|source| PrepError::Launch {
            index,
            name,
            program: invocation.program.clone(),
            source,
        })?;

    if !status.is_success() {
        return Err(PrepError::ToolFailed {
            index,
            name,
            program: invocation.program.clone(),
            status,
        });
    }

    for path in required_outputs {
        if !path.exists() {
            return Err(PrepError::MissingOutput { index, name, path });
        }
    }

    reporter.report(Progress::StepFinish);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrepConfigBuilder;
    use crate::invocation::ToolStatus;
    use std::fs;
    use std::io;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records every invocation and fakes tool side effects by touching the
    /// workflow's expected output files on success.
    struct RecordingRunner {
        log: Mutex<Vec<Invocation>>,
        fail_program_containing: Option<&'static str>,
        create_outputs: bool,
        workdir: PathBuf,
    }

    impl RecordingRunner {
        fn new(workdir: &Path) -> Self {
            Self {
                log: Mutex::new(Vec::new()),
                fail_program_containing: None,
                create_outputs: true,
                workdir: workdir.to_path_buf(),
            }
        }

        fn recorded(&self) -> Vec<Invocation> {
            self.log.lock().unwrap().clone()
        }
    }

    impl ToolRunner for RecordingRunner {
        fn run(&self, invocation: &Invocation) -> io::Result<ToolStatus> {
            self.log.lock().unwrap().push(invocation.clone());

            if let Some(needle) = self.fail_program_containing {
                let subcommand = invocation.args.first().map(String::as_str);
                if invocation.program.contains(needle) || subcommand == Some(needle) {
                    return Ok(ToolStatus::exited(1));
                }
            }
            if self.create_outputs {
                for name in ["protein.dcd", "protein.pdb", "conf.gro", "topol.top", "md.tpr"] {
                    fs::write(self.workdir.join(name), b"")?;
                }
            }
            Ok(ToolStatus::exited(0))
        }
    }

    fn test_config(dir: &TempDir) -> PrepConfig {
        let root = dir.path();
        PrepConfigBuilder::new()
            .input_trajectory(root.join("full.dcd"))
            .stripped_trajectory(root.join("protein.dcd"))
            .atom_index_file(root.join("indices.dat"))
            .structure_script(root.join("make_structure.tcl"))
            .structure_pdb(root.join("protein.pdb"))
            .coordinate_file(root.join("conf.gro"))
            .topology_file(root.join("topol.top"))
            .parameter_template(root.join("md.mdp"))
            .run_input_file(root.join("md.tpr"))
            .last_atom_index(3)
            .build()
            .unwrap()
    }

    #[test]
    fn steps_are_issued_in_workflow_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let runner = RecordingRunner::new(dir.path());

        run(&config, &runner, &ProgressReporter::new()).unwrap();

        let recorded = runner.recorded();
        assert_eq!(recorded.len(), 4);
        assert_eq!(recorded[0].program, "mdconvert");
        assert_eq!(recorded[1].program, "vmd");
        assert_eq!(recorded[2].args[0], "pdb2gmx");
        assert_eq!(recorded[3].args[0], "grompp");
    }

    #[test]
    fn index_file_is_written_before_any_tool_launches() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let runner = RecordingRunner::new(dir.path());

        run(&config, &runner, &ProgressReporter::new()).unwrap();

        let content = fs::read_to_string(&config.paths.atom_index_file).unwrap();
        assert_eq!(content, "0 1 2 3\n");
    }

    #[test]
    fn failing_tool_aborts_with_step_index_and_no_later_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let mut runner = RecordingRunner::new(dir.path());
        runner.fail_program_containing = Some("vmd");

        let err = run(&config, &runner, &ProgressReporter::new()).unwrap_err();

        assert!(matches!(err, PrepError::ToolFailed { index: 3, .. }));
        assert_eq!(err.step_index(), 3);
        // Strip and render ran; topology and preprocessing were never issued.
        assert_eq!(runner.recorded().len(), 2);
    }

    #[test]
    fn missing_required_output_aborts_before_the_next_step() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let mut runner = RecordingRunner::new(dir.path());
        runner.create_outputs = false;

        let err = run(&config, &runner, &ProgressReporter::new()).unwrap_err();

        assert!(matches!(
            err,
            PrepError::MissingOutput { index: 2, ref path, .. }
                if *path == config.paths.stripped_trajectory
        ));
        assert_eq!(runner.recorded().len(), 1);
    }

    #[test]
    fn missing_input_trajectory_is_still_handed_to_the_tool() {
        // The orchestrator performs no input validation: the converter is
        // invoked against the absent trajectory and its own failure is what
        // surfaces.
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        assert!(!config.paths.input_trajectory.exists());

        let mut runner = RecordingRunner::new(dir.path());
        runner.fail_program_containing = Some("mdconvert");

        let err = run(&config, &runner, &ProgressReporter::new()).unwrap_err();

        assert_eq!(runner.recorded().len(), 1);
        assert!(matches!(err, PrepError::ToolFailed { index: 2, .. }));
    }

    #[test]
    fn progress_events_bracket_each_completed_step() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let runner = RecordingRunner::new(dir.path());

        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|p| {
            events.lock().unwrap().push(p);
        }));

        run(&config, &runner, &reporter).unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        let starts: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                Progress::StepStart { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        let finishes = events
            .iter()
            .filter(|e| matches!(e, Progress::StepFinish))
            .count();

        assert_eq!(starts, vec![1, 2, 3, 4, 5]);
        assert_eq!(finishes, STEP_COUNT);
    }
}
