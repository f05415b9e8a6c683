use bxc::errors::{BxError, BxResult};
use bxc::utils::config::targets::{host_target, KNOWN_TARGETS};
use bxc::{backend::AssemblyGenerator, frontend, ir, read, write_output, InputKind};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter, Log, Metadata, Record};
use std::{path::Path, path::PathBuf, time::Instant};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "BX compiler back half: syntax tree to TAC to platform assembly",
    long_about = "BX compiler back half.\n\
                 Lowers a checked BX syntax tree (JSON) to three-address code with\n\
                 maximal munch, then emits assembly for the selected target.\n\
                 \n\
                 Example usage:\n\
                 bxc prog.json                         # Assembly for the host target\n\
                 bxc prog.json --target x64-linux      # Pick a target\n\
                 bxc prog.json --emit tac              # Write prog.tac.json\n\
                 bxc prog.tac.json -o prog.s           # Assemble existing TAC\n\
                 bxc prog.json --print-tac --verbose   # Show TAC and progress"
)]
struct Cli {
    // The path to the file to compile
    path: PathBuf,

    // Target name (x64-linux, arm64-apple-darwin)
    #[arg(long, value_parser = validate_target)]
    target: Option<String>,

    // Output file path (defaults to the input stem with a matching extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    // What to write: assembly, TAC as JSON, or TAC as text
    #[arg(long, value_enum, default_value_t = Emit::Asm)]
    emit: Emit,

    // Print TAC to stdout before assembly generation
    #[arg(long)]
    print_tac: bool,

    // Enable verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    // Show compilation timing
    #[arg(short, long)]
    timing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    Asm,
    Tac,
    TacText,
}

impl Emit {
    fn extension(&self) -> &'static str {
        match self {
            Emit::Asm => "s",
            Emit::Tac => "tac.json",
            Emit::TacText => "tac",
        }
    }
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[derive(Debug, Default)]
struct CompilationStats {
    load_time: f64,
    lowering_time: f64,
    assembly_time: f64,
    total_time: f64,
    procedures: usize,
    tac_instructions: usize,
    assembly_lines: usize,
}

fn validate_target(s: &str) -> Result<String, String> {
    if KNOWN_TARGETS.contains(&s) {
        Ok(s.to_string())
    } else {
        Err(format!(
            "Unsupported target: {}. Supported: {}",
            s,
            KNOWN_TARGETS.join(", ")
        ))
    }
}

// Print error message and exit with error code
fn fatal(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

// Strip `.json` / `.tac.json` and attach the extension for `emit`
fn determine_output_path(input_path: &Path, output: &Option<PathBuf>, emit: Emit) -> PathBuf {
    if let Some(path) = output {
        return path.clone();
    }
    let name = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("out");
    let stem = name
        .strip_suffix(".tac.json")
        .or_else(|| name.strip_suffix(".json"))
        .unwrap_or(name);
    PathBuf::from(format!("{}.{}", stem, emit.extension()))
}

// Read the input and produce checked TAC, lowering a syntax tree if needed
fn load_phase(input_path: &Path, stats: &mut CompilationStats) -> BxResult<ir::Program> {
    let start = Instant::now();
    let text = read(input_path)?;
    info!("read {} bytes from {}", text.len(), input_path.display());

    let tac = match InputKind::of(input_path) {
        InputKind::Tac => {
            let tac = ir::wire::from_json(&text)?;
            stats.load_time = start.elapsed().as_secs_f64();
            tac
        }
        InputKind::Ast => {
            let ast = frontend::load_program(&text)?;
            stats.load_time = start.elapsed().as_secs_f64();
            let lowering_start = Instant::now();
            let tac = ir::lower(&ast)?;
            stats.lowering_time = lowering_start.elapsed().as_secs_f64();
            tac
        }
    };
    ir::validate::check_program(&tac)?;
    stats.procedures = tac.procedures.len();
    stats.tac_instructions = tac.instruction_count();
    info!(
        "{} procedure(s), {} TAC instruction(s)",
        stats.procedures, stats.tac_instructions
    );
    Ok(tac)
}

fn assembly_phase(tac: &ir::Program, target: &str, stats: &mut CompilationStats) -> BxResult<String> {
    let start = Instant::now();
    let mut generator = AssemblyGenerator::new(target)?;
    generator.emit_assembly(tac)?;
    let output = generator.get_output().to_string();
    stats.assembly_time = start.elapsed().as_secs_f64();
    stats.assembly_lines = output.lines().filter(|l| !l.trim().is_empty()).count();
    info!("{}: {} assembly line(s)", target, stats.assembly_lines);
    Ok(output)
}

fn compile(args: &Cli, stats: &mut CompilationStats) -> BxResult<String> {
    let start = Instant::now();
    if !args.path.exists() {
        return Err(BxError::compilation_error(
            "file not found",
            format!("Input file does not exist: {}", args.path.display()),
        ));
    }
    let target = args.target.as_deref().unwrap_or(host_target());

    let tac = load_phase(&args.path, stats)?;
    if args.print_tac {
        print!("{}", tac);
    }

    let output = match args.emit {
        Emit::Asm => assembly_phase(&tac, target, stats)?,
        Emit::Tac => ir::wire::to_json(&tac)?,
        Emit::TacText => tac.to_string(),
    };
    stats.total_time = start.elapsed().as_secs_f64();
    Ok(output)
}

fn print_stats(stats: &CompilationStats) {
    println!("\nCompilation Statistics:");
    println!("  Load:                {:>8.3}s", stats.load_time);
    println!("  Maximal munch:       {:>8.3}s", stats.lowering_time);
    println!("  Assembly generation: {:>8.3}s", stats.assembly_time);
    println!("  Total:               {:>8.3}s", stats.total_time);
    println!("  Procedures:          {}", stats.procedures);
    println!("  TAC instructions:    {}", stats.tac_instructions);
    println!("  Assembly lines:      {}", stats.assembly_lines);
}

fn main() {
    let args = Cli::parse();
    init_logging(args.verbose);

    let mut stats = CompilationStats::default();
    let output = match compile(&args, &mut stats) {
        Ok(output) => output,
        Err(e) if e.is_internal() => fatal(&format!("internal compiler error: {}", e)),
        Err(e) => fatal(&e.to_string()),
    };

    let output_path = determine_output_path(&args.path, &args.output, args.emit);
    if let Err(e) = write_output(&output_path, &output) {
        fatal(&e.to_string());
    }
    info!("wrote {}", output_path.display());

    if args.timing {
        print_stats(&stats);
    }
}
