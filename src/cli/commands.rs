//! Command dispatch and handlers

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, instrument};

use crate::application::services::{random_array, Comparison, TraversalOrder};
use crate::application::ApplicationError;
use crate::cli::args::{
    AlgorithmArg, Cli, Commands, ConfigCommands, ExecutionArg, OrderArg,
};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{DomainError, SortAlgorithm, Tree};
use crate::infrastructure::{ConsoleSink, ServiceContainer, TraceLayout};

/// Load settings from config layers and apply CLI overrides.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(workers) = cli.workers {
        settings.workers = workers;
    }
    settings.validate()?;
    Ok(settings)
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Traverse {
            values,
            order,
            show_tree,
        }) => _traverse(cli, values, *order, *show_tree, io::stdin().lock()),
        Some(Commands::Sort {
            values,
            random,
            seed,
            algorithm,
            execution,
        }) => _sort(cli, values, *random, *seed, *algorithm, *execution),
        Some(Commands::Bench { sizes, seed }) => _bench(cli, sizes, *seed),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| CliError::io("print help", e))?;
            Ok(())
        }
    }
}

/// Reads one line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> CliResult<Option<String>> {
    let mut line = String::new();
    let n = input
        .read_line(&mut line)
        .map_err(|e| CliError::io("read input", e))?;
    Ok((n > 0).then_some(line))
}

/// Prompt for values until the user declines or input ends.
pub fn collect_values<R: BufRead>(mut input: R) -> CliResult<Vec<i32>> {
    let mut values = Vec::new();
    loop {
        output::prompt("Enter value to insert:");
        let Some(line) = read_line(&mut input)? else {
            break;
        };
        match line.trim().parse::<i32>() {
            Ok(value) => values.push(value),
            Err(_) => {
                output::warning(&format!("not an integer: {}", line.trim()));
                continue;
            }
        }

        output::prompt("Insert another node? (y/n):");
        let Some(answer) = read_line(&mut input)? else {
            break;
        };
        if !matches!(answer.trim(), "y" | "Y") {
            break;
        }
    }
    Ok(values)
}

/// Interactive values are read from `input` only once the pool is up.
#[instrument(skip(cli, input))]
fn _traverse<R: BufRead>(
    cli: &Cli,
    values: &[i32],
    order: OrderArg,
    show_tree: bool,
    input: R,
) -> CliResult<()> {
    let services = ServiceContainer::new(load_settings(cli)?)?;

    let values = if values.is_empty() {
        collect_values(input)?
    } else {
        values.to_vec()
    };
    let tree: Tree = values.into_iter().collect();
    debug!("tree built: nodes={} height={}", tree.len(), tree.height());

    output::info(&format!(
        "Parallel BFS and DFS tree traversal using {} worker threads",
        services.pool.workers()
    ));

    if show_tree {
        output::info(&tree);
    }

    let order = TraversalOrder::from(order);
    if order.includes_bfs() {
        output::header("Breadth First Search (parallel per level)");
        let sink = ConsoleSink::stdout(TraceLayout::PerLevel);
        report_empty(services.traversal.bfs(&tree, &sink))?;
    }
    if order.includes_dfs() {
        output::header("Depth First Search (parallel tasks)");
        let sink = ConsoleSink::stdout(TraceLayout::PerNode);
        report_empty(services.traversal.dfs(&tree, &sink))?;
    }
    Ok(())
}

/// An empty tree is reported, not fatal.
fn report_empty(result: Result<(), ApplicationError>) -> CliResult<()> {
    match result {
        Err(ApplicationError::Domain(DomainError::EmptyTree)) => {
            output::warning("tree is empty");
            Ok(())
        }
        other => Ok(other?),
    }
}

#[instrument(skip(cli))]
fn _sort(
    cli: &Cli,
    values: &[i32],
    random: Option<usize>,
    seed: Option<u64>,
    algorithm: AlgorithmArg,
    execution: ExecutionArg,
) -> CliResult<()> {
    let services = ServiceContainer::new(load_settings(cli)?)?;
    let settings = &services.settings;

    let (input, preview) = match random {
        Some(size) => {
            let mut rng = match seed.or(settings.bench.seed) {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let input = random_array(&mut rng, size, settings.bench.max_value);
            (input, settings.bench.preview)
        }
        None => (values.to_vec(), values.len()),
    };

    output::info(&format!(
        "Input ({} values, {} workers): {}",
        input.len(),
        services.pool.workers(),
        output::join_values(&input[..preview.min(input.len())])
    ));

    let results = services.sorter.sort_each(
        &input,
        &algorithm.algorithms(),
        &execution.executions(),
    );
    for (run, sorted) in &results {
        output::action(
            &format!("{} {}", run.execution, run.algorithm),
            &format!(
                "{:.6} seconds: {}",
                run.elapsed.as_secs_f64(),
                output::join_values(&sorted[..preview.min(sorted.len())])
            ),
        );
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _bench(cli: &Cli, sizes: &[usize], seed: Option<u64>) -> CliResult<()> {
    let mut settings = load_settings(cli)?;
    if !sizes.is_empty() {
        settings.bench.sizes = sizes.to_vec();
    }
    if seed.is_some() {
        settings.bench.seed = seed;
    }

    let services = ServiceContainer::new(settings)?;
    output::info(&format!(
        "Running with {} threads, merge sort forks to depth {}",
        services.pool.workers(),
        services.sorter.fork_depth()
    ));

    for comparison in services.benchmark.run()? {
        print_comparison(&comparison);
    }
    output::success("all variants produced identical sorted output");
    Ok(())
}

fn print_comparison(comparison: &Comparison) {
    let preview = comparison.original_preview.len();
    output::info("");
    output::header(&format!("======= Array Size: {} =======", comparison.size));
    output::info(&format!(
        "Original array (first {}): {}",
        preview,
        output::join_values(&comparison.original_preview)
    ));

    for algorithm in SortAlgorithm::ALL {
        output::info(&format!("\n{} sort:", algorithm));
        for (run, head) in comparison
            .runs
            .iter()
            .filter(|(run, _)| run.algorithm == algorithm)
        {
            output::timing(&run.execution.to_string(), run.elapsed);
            output::detail(&format!(
                "Sorted (first {}): {}",
                head.len(),
                output::join_values(head)
            ));
        }
    }
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let state = if path.exists() { "exists" } else { "not found" };
                output::action("global", &format!("{} ({})", path.display(), state));
            }
            None => output::warning("cannot determine global config directory"),
        },
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::InvalidArgs("cannot determine global config directory".into())
            })?;
            write_template(path, *force)?;
        }
    }
    Ok(())
}

fn write_template(path: PathBuf, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidArgs(format!(
            "config already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| CliError::io(format!("create {}", dir.display()), e))?;
    }
    fs::write(&path, Settings::template())
        .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
    output::success(&format!("created {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn given_answers_when_collecting_then_stops_at_no() {
        let input = Cursor::new("7\ny\n3\nY\n2\nn\n9\n");
        assert_eq!(collect_values(input).unwrap(), vec![7, 3, 2]);
    }

    #[test]
    fn given_invalid_entry_when_collecting_then_reprompts() {
        let input = Cursor::new("x\n5\ny\n-4\n");
        assert_eq!(collect_values(input).unwrap(), vec![5, -4]);
    }

    #[test]
    fn given_no_input_when_collecting_then_returns_empty() {
        assert!(collect_values(Cursor::new("")).unwrap().is_empty());
    }

    #[test]
    fn given_invalid_config_when_traversing_interactively_then_fails_before_reading_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("forkjoin.toml");
        fs::write(&path, "workers = 0\n").unwrap();
        let path_arg = path.to_string_lossy().into_owned();
        let cli = <Cli as clap::Parser>::try_parse_from(["forkjoin", "-c", &path_arg, "traverse"])
            .unwrap();
        let mut input = Cursor::new("7\nn\n");

        let result = _traverse(&cli, &[], OrderArg::Both, false, &mut input);

        assert!(matches!(
            result,
            Err(CliError::Application(ApplicationError::Config { .. }))
        ));
        assert_eq!(input.position(), 0, "no value was read");
    }

    #[test]
    fn given_valid_config_when_traversing_interactively_then_reads_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("forkjoin.toml");
        fs::write(&path, "workers = 2\n").unwrap();
        let path_arg = path.to_string_lossy().into_owned();
        let cli = <Cli as clap::Parser>::try_parse_from(["forkjoin", "-c", &path_arg, "traverse"])
            .unwrap();
        let mut input = Cursor::new("7\ny\n3\nn\n");

        _traverse(&cli, &[], OrderArg::Bfs, false, &mut input).unwrap();

        assert_eq!(input.position(), 8);
    }

    #[test]
    fn given_existing_file_without_force_when_writing_template_then_refuses() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("forkjoin.toml");
        fs::write(&path, "workers = 2\n").unwrap();

        assert!(matches!(
            write_template(path.clone(), false),
            Err(CliError::InvalidArgs(_))
        ));
        write_template(path.clone(), true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), Settings::template());
    }
}
