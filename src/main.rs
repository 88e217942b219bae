use clap::Parser;
use qcsim::config::SimConfig;
use qcsim::instructions;
use qcsim::operator::Kernel;
use qcsim::render::{self, OutputFormat};
use qcsim::runtime::{MeasurementMode, Session};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

const QCSIM_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "qcsim", version = QCSIM_VERSION,
    about = "qcsim - a state-vector simulator for small quantum circuits.\n\
             Programs hold one instruction per line: Q[n], X/Y/Z/H/T[q], CX[c,t], D, MZ[q].",
    long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Runs a circuit program.
    Run {
        /// Program file path, prompted for on stdin when omitted.
        program: Option<PathBuf>,
        /// JSON file with simulation settings; flags below override it.
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Seed the measurement RNG for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,
        /// Collapse the state after each measurement instead of only sampling it.
        #[arg(long)]
        collapse: bool,
        /// Refuse registers larger than this many qubits.
        #[arg(long, value_name = "N")]
        max_qubits: Option<usize>,
        /// Gate kernel: strided (in place) or dense (full kronecker operator).
        #[arg(long, value_parser = parse_kernel)]
        kernel: Option<Kernel>,
        /// Check normalization after every gate.
        #[arg(long)]
        validate: bool,
        /// Print display and measurement output as JSON lines.
        #[arg(long)]
        json: bool,
        /// Enable debug logging.
        #[arg(long)]
        debug: bool,
    },
    /// Parses a circuit program without running it.
    Check {
        /// Program file path
        program: PathBuf,
        /// Enable debug logging.
        #[arg(long)]
        debug: bool,
    },
    /// Prints the qcsim version.
    Version,
}

fn parse_kernel(s: &str) -> Result<Kernel, String> {
    match s.to_lowercase().as_str() {
        "strided" => Ok(Kernel::Strided),
        "dense" => Ok(Kernel::Dense),
        _ => Err(format!("unknown kernel '{}', expected strided or dense", s)),
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn prompt_program_path() -> Result<PathBuf, String> {
    print!("Enter the code file's name: ");
    io::stdout().flush().map_err(|e| e.to_string())?;
    let mut name = String::new();
    io::stdin()
        .lock()
        .read_line(&mut name)
        .map_err(|e| format!("error reading file name: {}", e))?;
    Ok(PathBuf::from(name.trim()))
}

fn read_program(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            log::debug!("failed to open {}: {}", path.display(), e);
            println!("Can't open file!");
            process::exit(1);
        }
    }
}

fn run_program(path: &Path, config: SimConfig, format: OutputFormat) {
    let source = read_program(path);
    log::debug!("running {} with {:?}", path.display(), config);

    let mut session = Session::new(config);
    let result = session.run_source(&source, |_, outcome| {
        if let Some(text) = render::render(outcome, format) {
            println!("{}", text);
        }
    });

    match result {
        Ok(summary) => log::debug!(
            "executed {} instructions over {} lines, {} measurements",
            summary.executed,
            summary.lines,
            summary.measurements.len()
        ),
        Err(e) => {
            log::debug!("{}: {}", e, e.kind);
            println!("{}", e);
            process::exit(1);
        }
    }
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            program,
            config,
            seed,
            collapse,
            max_qubits,
            kernel,
            validate,
            json,
            debug,
        } => {
            init_logging(debug);

            let mut sim_config = match config {
                Some(path) => SimConfig::from_file(&path)?,
                None => SimConfig::default(),
            };
            if seed.is_some() {
                sim_config.seed = seed;
            }
            if collapse {
                sim_config.measurement = MeasurementMode::Collapse;
            }
            if let Some(limit) = max_qubits {
                sim_config.max_qubits = limit;
            }
            if sim_config.max_qubits > qcsim::config::HARD_MAX_QUBITS {
                log::warn!(
                    "max qubits {} clamped to {}",
                    sim_config.max_qubits,
                    qcsim::config::HARD_MAX_QUBITS
                );
            }
            if let Some(kernel) = kernel {
                sim_config.kernel = kernel;
            }
            sim_config.validate |= validate;

            let program = match program {
                Some(path) => path,
                None => prompt_program_path()?,
            };
            let format = if json { OutputFormat::Json } else { OutputFormat::Text };
            run_program(&program, sim_config, format);
        }
        Commands::Check { program, debug } => {
            init_logging(debug);
            let source = read_program(&program);
            match instructions::parse_program(&source) {
                Ok(parsed) => println!("{}: {} instructions ok", program.display(), parsed.len()),
                Err(e) => {
                    log::debug!("{}: {}", e, e.kind);
                    println!("{}", e);
                    process::exit(1);
                }
            }
        }
        Commands::Version => {
            println!("qcsim version {}", QCSIM_VERSION);
        }
    }
    Ok(())
}
