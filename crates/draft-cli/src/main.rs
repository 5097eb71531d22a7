//! Draft Board CLI
//!
//! Command-line tool for inspecting draft board sheet exports, reconstructing
//! snake draft history from them, and ingesting the result into a roster file.

use clap::{Parser, Subcommand, ValueEnum};
use draft_core::{
    detect_structure, ingest, load_grid, parse_board, parse_pool, scan_directory, Grid,
    MemoryRoster, ParseConfig, ParseReport,
};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "draft-cli")]
#[command(about = "Reconstruct draft history from draft board sheets", long_about = None)]
#[command(version)]
struct Cli {
    /// Parse config file (JSON); defaults are used when omitted
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging (use -vv for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which axis of a sheet carries the teams
    Detect {
        /// Sheet export (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List the team columns found in a sheet
    Teams {
        /// Sheet export (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show sequenced picks
    Picks {
        /// Sheet export (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Maximum number of picks to display
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only show picks for this team column
        #[arg(long)]
        team: Option<usize>,
    },

    /// Read the sheet as an available pool instead of a pick history
    Pool {
        /// Sheet export (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Include struck-out entries
        #[arg(short, long)]
        all: bool,
    },

    /// Parse a sheet and write the full report
    Parse {
        /// Sheet export (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse every sheet under one or more directories
    Batch {
        /// Root directories to scan
        #[arg(short, long, required = true)]
        root: Vec<PathBuf>,

        /// Number of worker threads (0 = one per core)
        #[arg(short = 'j', long, default_value_t = 0, value_name = "N")]
        threads: usize,
    },

    /// Parse a sheet and upsert its picks into a roster file
    Ingest {
        /// Sheet export (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Roster snapshot (JSON); created when missing
        #[arg(short, long)]
        roster: PathBuf,
    },

    /// Write a config file with every default filled in
    CreateConfig {
        /// Output path for the config file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> draft_core::Result<()> {
    let config = match &cli.config {
        Some(path) => {
            debug!("loading config from {}", path.display());
            ParseConfig::load(path)?
        }
        None => ParseConfig::default(),
    };

    match cli.command {
        Commands::Detect { file } => cmd_detect(&file, &config),
        Commands::Teams { file } => cmd_teams(&file, &config),
        Commands::Picks { file, limit, team } => cmd_picks(&file, &config, limit, team),
        Commands::Pool { file, all } => cmd_pool(&file, &config, all),
        Commands::Parse {
            file,
            format,
            output,
        } => cmd_parse(&file, &config, format, output.as_deref()),
        Commands::Batch { root, threads } => cmd_batch(&root, &config, threads),
        Commands::Ingest { file, roster } => cmd_ingest(&file, &config, &roster),
        Commands::CreateConfig { output } => cmd_create_config(&output),
    }
}

fn load(file: &Path) -> draft_core::Result<Grid> {
    let grid = load_grid(file)?;
    debug!(
        "loaded '{}': {} rows x {} columns",
        grid.name,
        grid.row_count(),
        grid.column_count()
    );
    Ok(grid)
}

fn cmd_detect(file: &Path, config: &ParseConfig) -> draft_core::Result<()> {
    let grid = load(file)?;
    let detection = detect_structure(&grid, config);

    println!("Sheet: {}", grid.name);
    println!("Size: {} rows x {} columns", grid.row_count(), grid.column_count());
    println!("Orientation: {:?}", detection.orientation);
    println!("Confidence: {:?}", detection.confidence);
    if detection.is_valid() {
        println!("Team row: {}", detection.team_row);
        println!("Data starts: {}", detection.data_start);
    }

    Ok(())
}

fn cmd_teams(file: &Path, config: &ParseConfig) -> draft_core::Result<()> {
    let grid = load(file)?;
    let report = parse_board(&grid, config)?;

    println!("Teams ({}):", report.teams.len());
    println!();
    println!("Column\tValue\tPicks\tName");
    for team in &report.teams {
        println!(
            "{}\t{}\t{}\t{}",
            team.column_index,
            team.value,
            report.picks_for(team.column_index).len(),
            report.team_names.name_for(team)
        );
    }

    Ok(())
}

fn cmd_picks(
    file: &Path,
    config: &ParseConfig,
    limit: Option<usize>,
    team: Option<usize>,
) -> draft_core::Result<()> {
    let grid = load(file)?;
    let report = parse_board(&grid, config)?;

    let records: Vec<_> = report
        .records()
        .into_iter()
        .filter(|r| team.map_or(true, |c| r.column == c))
        .collect();

    println!("Overall\tRound\tPick\tTeam\tEntry");
    println!("{}", "-".repeat(48));

    let row_limit = limit.unwrap_or(records.len());
    for record in records.iter().take(row_limit) {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            record.overall_pick, record.round, record.pick_order, record.team_name, record.entry_name
        );
    }

    if records.len() > row_limit {
        println!("... ({} more picks)", records.len() - row_limit);
    }

    println!();
    println!("{}", report.summary());
    Ok(())
}

fn cmd_pool(file: &Path, config: &ParseConfig, all: bool) -> draft_core::Result<()> {
    let grid = load(file)?;
    let report = parse_pool(&grid, config);

    println!("Value\tEntry");
    for entry in report.entries.iter().filter(|e| all || e.available) {
        let marker = if entry.available { "" } else { " (taken)" };
        println!("{}\t{}{}", entry.value, entry.name, marker);
    }

    println!();
    println!("{}", report.summary());
    Ok(())
}

fn cmd_parse(
    file: &Path,
    config: &ParseConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> draft_core::Result<()> {
    let grid = load(file)?;
    let report = parse_board(&grid, config)?;

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match format {
        OutputFormat::Text => write_text(&mut writer, &report)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            writeln!(writer, "{}", json)?;
        }
        OutputFormat::Csv => write_csv(&mut writer, &report)?,
    }
    writer.flush()?;

    if let Some(path) = output {
        println!("Wrote {} picks to {}", report.picks.len(), path.display());
    }

    Ok(())
}

fn write_text<W: Write>(writer: &mut W, report: &ParseReport) -> io::Result<()> {
    writeln!(writer, "Sheet: {}", report.sheet)?;
    writeln!(
        writer,
        "Layout: {:?} ({:?} confidence)",
        report.detection.orientation, report.detection.confidence
    )?;
    writeln!(writer, "Rounds: {}", report.round_count())?;
    if !report.team_names.is_empty() {
        writeln!(writer, "Team names:")?;
        for (value, name) in report.team_names.iter() {
            writeln!(writer, "  {} pts: {}", value, name)?;
        }
    }
    writeln!(writer)?;

    for team in &report.teams {
        let picks = report.picks_for(team.column_index);
        writeln!(
            writer,
            "{} [{} pts] ({} picks)",
            report.team_names.name_for(team),
            team.value,
            picks.len()
        )?;
        for pick in picks {
            writeln!(
                writer,
                "  R{} #{}: {}",
                pick.round, pick.overall_pick, pick.pick.entry_name
            )?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "{}", report.summary())
}

fn write_csv<W: Write>(writer: &mut W, report: &ParseReport) -> io::Result<()> {
    writeln!(
        writer,
        "overall_pick,round,pick_order,team_name,team_value,entry_name,row,column"
    )?;
    for r in report.records() {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{}",
            r.overall_pick,
            r.round,
            r.pick_order,
            escape_csv(&r.team_name),
            r.team_value,
            escape_csv(&r.entry_name),
            r.row,
            r.column
        )?;
    }
    Ok(())
}

fn cmd_batch(roots: &[PathBuf], config: &ParseConfig, threads: usize) -> draft_core::Result<()> {
    let scan = scan_directory(roots)?;
    info!("found {} sheets under {} root(s)", scan.total_files(), scan.roots.len());

    let parse_all = || {
        scan.sheets
            .par_iter()
            .map(|sheet| {
                let outcome = load_grid(&sheet.path).and_then(|grid| parse_board(&grid, config));
                (sheet.path.clone(), outcome)
            })
            .collect::<Vec<_>>()
    };

    let results = match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(parse_all),
        Err(e) => {
            warn!("could not build a {}-thread pool ({}); using the global pool", threads, e);
            parse_all()
        }
    };

    let mut total_picks = 0;
    let mut low_confidence = 0;
    let mut errors = Vec::new();

    for (path, outcome) in results {
        match outcome {
            Ok(report) => {
                total_picks += report.picks.len();
                if report.is_low_confidence() {
                    low_confidence += 1;
                }
                println!("  {}", report.summary());
            }
            Err(e) => errors.push((path, e.to_string())),
        }
    }

    println!();
    println!("Batch complete:");
    println!("  {} sheets parsed", scan.total_files() - errors.len());
    println!("  {} total picks extracted", total_picks);
    println!("  {} low-confidence layouts", low_confidence);

    if !errors.is_empty() {
        println!("\nErrors ({}):", errors.len());
        for (path, err) in &errors {
            println!("  {}: {}", path.display(), err);
        }
    }

    Ok(())
}

fn cmd_ingest(file: &Path, config: &ParseConfig, roster_path: &Path) -> draft_core::Result<()> {
    let grid = load(file)?;
    let report = parse_board(&grid, config)?;

    let mut roster = MemoryRoster::load(roster_path, config.default_budget)?;
    let stats = ingest(&report, &mut roster)?;
    roster.save(roster_path)?;

    println!("{}", report.summary());
    println!("Roster: {}", roster_path.display());
    println!("  {} picks inserted", stats.inserted);
    println!("  {} picks updated", stats.updated);
    if stats.over_budget > 0 {
        println!("  {} picks over budget", stats.over_budget);
    }

    for (name, team) in &roster.teams {
        println!(
            "  {}: {} entries, {} of {} pts remaining",
            name,
            team.entries.len(),
            team.budget.remaining(),
            team.budget.total
        );
    }

    Ok(())
}

fn cmd_create_config(output: &Path) -> draft_core::Result<()> {
    ParseConfig::default().save(output)?;
    println!("Created config file: {}", output.display());
    println!();
    println!("Edit the file to match your sheet layout, then run:");
    println!("  draft-cli --config {} parse --file <sheet>", output.display());

    Ok(())
}

/// Escape a value for CSV output
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
