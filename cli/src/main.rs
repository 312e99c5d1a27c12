use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use iam_schema_core::{ColumnDescriptor, SchemaPackage, TableDescriptor, validate_package};
use iam_schema_registry::{RegistryConfig, SchemaRegistry, SourceConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for `show`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "iam-schema", version)]
#[command(about = "Inspect the IAM table registry and apply it to SQLite")]
struct Cli {
    #[command(flatten)]
    sources: SourceArgs,
    /// Log registry loading and database inspection to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Registry configuration YAML.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory of per-table JSON descriptors (repeatable).
    #[arg(long = "dir", global = true)]
    dirs: Vec<PathBuf>,
    /// Package bundle JSON file (repeatable).
    #[arg(long = "bundle", global = true)]
    bundles: Vec<PathBuf>,
    /// Do not load the built-in IAM catalog.
    #[arg(long, global = true)]
    no_builtin: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered tables with column counts and primary keys.
    Tables,
    /// Print one table descriptor.
    Show(ShowArgs),
    /// Load every source and validate all descriptors.
    Validate,
    /// Write the registry as a package bundle.
    Export(ExportArgs),
    /// Print SQLite DDL for the registry or one table.
    Ddl(DdlArgs),
    /// Create missing registered tables in a SQLite database.
    Apply(DbArgs),
    /// Compare a SQLite database with the registry; exits 1 on drift.
    Check(DbArgs),
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Table name.
    table: String,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// Output JSON bundle path.
    #[arg(long)]
    output: PathBuf,
    /// Optional bundle name metadata.
    #[arg(long)]
    name: Option<String>,
    /// Optional bundle description metadata.
    #[arg(long)]
    description: Option<String>,
}

#[derive(Debug, Args)]
struct DdlArgs {
    /// Only print the statement for this table.
    #[arg(long)]
    table: Option<String>,
}

#[derive(Debug, Args)]
struct DbArgs {
    /// Database file path.
    #[arg(long)]
    db: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_registry(&cli.sources).and_then(|registry| match cli.command {
        Command::Tables => run_tables(&registry),
        Command::Show(args) => run_show(&registry, args),
        Command::Validate => run_validate(&registry),
        Command::Export(args) => run_export(&registry, args),
        Command::Ddl(args) => run_ddl(&registry, args),
        Command::Apply(args) => run_apply(&registry, args),
        Command::Check(args) => run_check(&registry, args),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, defaulting to
/// `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_registry(args: &SourceArgs) -> Result<SchemaRegistry, String> {
    let mut config = match &args.config {
        Some(path) => RegistryConfig::load(path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?,
        None => RegistryConfig::default(),
    };
    if args.no_builtin {
        config.builtin = false;
    }
    config
        .sources
        .extend(args.dirs.iter().cloned().map(SourceConfig::Dir));
    config
        .sources
        .extend(args.bundles.iter().cloned().map(SourceConfig::Bundle));

    debug!(builtin = config.builtin, sources = config.sources.len(), "loading registry");
    config
        .builder()
        .build()
        .map_err(|e| format!("Failed to load registry: {e}"))
}

fn run_tables(registry: &SchemaRegistry) -> Result<(), String> {
    for table in registry.tables() {
        println!(
            "{}\t{}\t{}",
            table.name,
            table.column_count(),
            table.primary_key_names().join(",")
        );
    }
    Ok(())
}

fn run_show(registry: &SchemaRegistry, args: ShowArgs) -> Result<(), String> {
    let table = registry
        .lookup(&args.table)
        .ok_or_else(|| format!("table not found: {}", args.table))?;

    match args.format {
        CliOutputFormat::Json => {
            let raw = serde_json::to_string_pretty(table)
                .map_err(|err| format!("Failed to serialize table: {err}"))?;
            println!("{raw}");
        }
        CliOutputFormat::Yaml => {
            let raw = serde_yaml::to_string(table)
                .map_err(|err| format!("Failed to serialize table: {err}"))?;
            print!("{raw}");
        }
        CliOutputFormat::Text => print!("{}", format_table_text(table)),
    }
    Ok(())
}

fn run_validate(registry: &SchemaRegistry) -> Result<(), String> {
    let package = build_package(registry)?;
    if let Some(err) = validate_package(&package).into_iter().next() {
        return Err(err.to_string());
    }
    println!(
        "Validated {} table(s) from {} source(s).",
        registry.len(),
        registry.sources().len()
    );
    if let Some(fingerprint) = &package.fingerprint {
        println!("Fingerprint: {fingerprint}");
    }
    Ok(())
}

fn run_export(registry: &SchemaRegistry, args: ExportArgs) -> Result<(), String> {
    let mut package = build_package(registry)?;
    package.name = args.name;
    package.description = args.description;

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }

    let raw = serde_json::to_string_pretty(&package)
        .map_err(|err| format!("Failed to serialize package: {err}"))?;
    fs::write(&args.output, raw)
        .map_err(|err| format!("Failed to write '{}': {err}", args.output.display()))?;

    println!(
        "Exported {} table(s) into '{}'.",
        package.table_count(),
        args.output.display()
    );
    Ok(())
}

fn run_ddl(registry: &SchemaRegistry, args: DdlArgs) -> Result<(), String> {
    let sql = match &args.table {
        Some(table) => iam_schema_sqlite::fetch_ddl(registry, table),
        None => iam_schema_sqlite::generate_schema_sql(registry),
    }
    .map_err(|e| e.to_string())?;
    print!("{sql}");
    Ok(())
}

fn run_apply(registry: &SchemaRegistry, args: DbArgs) -> Result<(), String> {
    let mut conn = open_database(&args)?;
    let created = iam_schema_sqlite::create_tables(&mut conn, registry)
        .map_err(|e| format!("Failed to create tables: {e}"))?;
    println!(
        "Created {created} table(s) in '{}' ({} registered).",
        args.db.display(),
        registry.len()
    );
    Ok(())
}

fn run_check(registry: &SchemaRegistry, args: DbArgs) -> Result<(), String> {
    let conn = open_database(&args)?;
    let drift = iam_schema_sqlite::check_schema(&conn, registry)
        .map_err(|e| format!("Failed to inspect database: {e}"))?;

    if drift.is_clean() {
        println!(
            "Database '{}' matches {} registered table(s).",
            args.db.display(),
            registry.len()
        );
        return Ok(());
    }

    for issue in &drift.issues {
        println!("{issue}");
    }
    Err(format!("{} drift issue(s) found", drift.issues.len()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_package(registry: &SchemaRegistry) -> Result<SchemaPackage, String> {
    registry
        .to_package(PACKAGE_VERSION, &chrono::Utc::now().to_rfc3339())
        .map_err(|e| format!("Failed to package registry: {e}"))
}

fn open_database(args: &DbArgs) -> Result<rusqlite::Connection, String> {
    rusqlite::Connection::open(&args.db)
        .map_err(|e| format!("Failed to open database '{}': {e}", args.db.display()))
}

fn format_type(column: &ColumnDescriptor) -> String {
    if column.database_type.is_sized() {
        format!("{}({})", column.database_type, column.length)
    } else {
        column.database_type.to_string()
    }
}

/// Renders a descriptor as an aligned column listing.
fn format_table_text(table: &TableDescriptor) -> String {
    let rows: Vec<[String; 6]> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            [
                (i + 1).to_string(),
                c.name.clone(),
                format_type(c),
                if c.nullable { "NULL" } else { "NOT NULL" }.to_string(),
                if c.primary_key { "PK" } else { "" }.to_string(),
                c.default_value.clone().unwrap_or_default(),
            ]
        })
        .collect();
    let header = ["#", "column", "type", "null", "key", "default"].map(String::from);

    let mut widths = [0usize; 6];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = format!("{} ({} columns)\n", table.name, table.column_count());
    for row in std::iter::once(&header).chain(rows.iter()) {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str("  ");
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}
