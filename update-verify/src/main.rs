//! Update verify config tool.
//!
//! Reads an update verify config, reports on it, adds locales, and splits it
//! into chunks for parallel verification workers.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use update_verify::io::settings::{SETTINGS_FILE, Settings, load_settings, write_settings};
use update_verify::{Release, UpdateVerifyConfig, UpdateVerifyError, exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "update-verify",
    version,
    about = "Read, edit and chunk update verify configs"
)]
struct Cli {
    /// Tool settings file.
    #[arg(long, global = true, default_value = SETTINGS_FILE)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default settings file if missing.
    Init {
        /// Overwrite an existing settings file.
        #[arg(short, long)]
        force: bool,
    },
    /// Parse a config and print release, test and locale counts.
    Check { config: PathBuf },
    /// Write one chunk of a config (to stdout unless `--output` is given).
    Chunk {
        config: PathBuf,
        #[arg(long)]
        chunks: usize,
        #[arg(long)]
        this_chunk: usize,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write every chunk of a config as `<stem>-<n>.cfg`.
    Split {
        config: PathBuf,
        /// Defaults to `default_chunks` from settings.
        #[arg(long)]
        chunks: Option<usize>,
        /// Defaults to `output_dir` from settings.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Add a locale to a release and rewrite the config in place.
    AddLocale {
        config: PathBuf,
        #[arg(long)]
        build_id: String,
        #[arg(long)]
        locale: String,
        /// Match the full test updating from this path; omit for quick tests.
        #[arg(long)]
        from: Option<String>,
    },
    /// List full or quick release tests, one per line.
    Tests {
        config: PathBuf,
        #[arg(long, value_enum)]
        kind: TestKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TestKind {
    Full,
    Quick,
}

fn main() {
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_code_for(&err)
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if let Command::Init { force } = cli.command {
        logging::init(&Settings::default().log_filter);
        return cmd_init(&cli.settings, force);
    }
    let settings = load_settings(&cli.settings)?;
    logging::init(&settings.log_filter);

    match cli.command {
        Command::Init { .. } => Ok(()),
        Command::Check { config } => cmd_check(&config),
        Command::Chunk {
            config,
            chunks,
            this_chunk,
            output,
        } => cmd_chunk(&config, chunks, this_chunk, output.as_deref()),
        Command::Split {
            config,
            chunks,
            output_dir,
        } => cmd_split(&config, &settings, chunks, output_dir),
        Command::AddLocale {
            config,
            build_id,
            locale,
            from,
        } => cmd_add_locale(&config, &build_id, &locale, from.as_deref()),
        Command::Tests { config, kind } => cmd_tests(&config, kind),
    }
}

/// Map library errors to stable exit codes; anything else is `INVALID`.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<UpdateVerifyError>() {
        Some(UpdateVerifyError::Parse { .. }) => exit_codes::PARSE,
        Some(UpdateVerifyError::ReleaseNotFound { .. }) => exit_codes::NOT_FOUND,
        _ => exit_codes::INVALID,
    }
}

fn load(path: &Path) -> Result<UpdateVerifyConfig> {
    UpdateVerifyConfig::load(path).with_context(|| format!("load {}", path.display()))
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        info!(path = %path.display(), "settings file exists; leaving it");
        return Ok(());
    }
    write_settings(path, &Settings::default())?;
    info!(path = %path.display(), "wrote default settings");
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let summary = load(path)?.summary();
    println!(
        "releases={} full={} quick={} locales={}",
        summary.releases, summary.full_tests, summary.quick_tests, summary.locale_pairs
    );
    Ok(())
}

fn cmd_chunk(path: &Path, chunks: usize, this_chunk: usize, output: Option<&Path>) -> Result<()> {
    validate_chunk_args(chunks, this_chunk)?;
    let chunked = load(path)?.get_chunk(chunks, this_chunk);
    match output {
        Some(out) => chunked
            .write(out)
            .with_context(|| format!("write chunk {}", out.display()))?,
        None => chunked
            .write_to(io::stdout().lock())
            .context("write chunk to stdout")?,
    }
    Ok(())
}

fn cmd_split(
    path: &Path,
    settings: &Settings,
    chunks: Option<usize>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let chunks = chunks.unwrap_or(settings.default_chunks);
    let output_dir = output_dir.unwrap_or_else(|| settings.output_dir.clone());
    validate_chunk_args(chunks, 1)?;

    let config = load(path)?;
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("update-verify");
    for this_chunk in 1..=chunks {
        let out = output_dir.join(format!("{stem}-{this_chunk}.cfg"));
        let chunked = config.get_chunk(chunks, this_chunk);
        chunked
            .write(&out)
            .with_context(|| format!("write chunk {}", out.display()))?;
        info!(
            chunk = this_chunk,
            releases = chunked.releases.len(),
            path = %out.display(),
            "wrote chunk"
        );
    }
    Ok(())
}

fn cmd_add_locale(path: &Path, build_id: &str, locale: &str, from: Option<&str>) -> Result<()> {
    let mut config = load(path)?;
    config.add_locale_to_release(build_id, locale, from)?;
    config
        .write(path)
        .with_context(|| format!("write {}", path.display()))?;
    info!(build_id, locale, "locale added");
    Ok(())
}

fn cmd_tests(path: &Path, kind: TestKind) -> Result<()> {
    let config = load(path)?;
    let releases = match kind {
        TestKind::Full => config.get_full_release_tests(),
        TestKind::Quick => config.get_quick_release_tests(),
    };
    for release in releases {
        println!("{}", describe(release));
    }
    Ok(())
}

fn describe(release: &Release) -> String {
    format!(
        "{} {} {} from={} locales={}",
        release.release,
        release.build_id,
        release.platform,
        release.from.as_deref().unwrap_or("-"),
        release.locales.join(",")
    )
}

fn validate_chunk_args(chunks: usize, this_chunk: usize) -> Result<()> {
    if chunks == 0 {
        bail!("--chunks must be > 0");
    }
    if this_chunk == 0 || this_chunk > chunks {
        bail!("--this-chunk must be between 1 and {chunks}");
    }
    Ok(())
}
