mod clipboard;
mod notice;
mod prefs;
mod session;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use glyph_render::{standard, GlyphRenderer};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use walkdir::WalkDir;

use crate::clipboard::SystemClipboard;
use crate::notice::Notice;
use crate::prefs::{PrefKey, Preferences};
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render text as block letters made of two glyphs")]
struct Cli {
    /// Preference file, defaults to the user config directory
    #[arg(long, global = true, env = "GLYPH_PREFS", value_name = "FILE")]
    prefs: Option<PathBuf>,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the rendered text to stdout
    Preview(RenderArgs),
    /// Render text and write the result to a file
    Convert(ConvertArgs),
    /// Render text and copy the result to the clipboard
    Copy(RenderArgs),
    /// Render every line of a text file, or of every text file in a directory
    Batch(BatchArgs),
    /// Edit the inputs line by line and re-render after each change
    Interactive(InteractiveArgs),
    /// Inspect or edit the stored preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Text to render, defaults to the stored input text
    text: Option<String>,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Text to render, defaults to the stored input text
    text: Option<String>,
    /// Output file path
    #[arg(short, long)]
    output: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Input text file or directory
    input: PathBuf,
    /// Output directory for rendered files
    #[arg(short, long)]
    out_dir: PathBuf,
    /// Extension of the files picked up when walking a directory
    #[arg(long, default_value = "txt")]
    extension: String,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct InteractiveArgs {
    /// Leave the stored preferences untouched on exit
    #[arg(long)]
    no_save: bool,
}

#[derive(Subcommand, Debug)]
enum PrefsCommand {
    /// Print the stored preferences
    Show,
    /// Print the preference file location
    Path,
    /// Change a single preference
    Set {
        #[arg(value_enum)]
        key: PrefKey,
        value: String,
    },
    /// Restore the default preferences
    Reset,
}

#[derive(Parser, Debug, Clone)]
struct RenderSettings {
    /// Glyph painted on "on" cells
    #[arg(long, value_parser = parse_glyph)]
    inner: Option<String>,
    /// Glyph painted on "off" cells
    #[arg(long, value_parser = parse_glyph)]
    outer: Option<String>,
    /// Frame the output with a one-cell border
    #[arg(long, overrides_with = "no_border")]
    border: bool,
    /// Render without a border
    #[arg(long, overrides_with = "border")]
    no_border: bool,
    /// Store the effective settings as the new defaults
    #[arg(long)]
    save: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let prefs_path = cli.prefs.clone().or_else(Preferences::default_path);
    let prefs_path = prefs_path.as_deref();

    match cli.command {
        Commands::Preview(args) => preview(args, prefs_path),
        Commands::Convert(args) => convert(args, prefs_path),
        Commands::Copy(args) => copy(args, prefs_path),
        Commands::Batch(args) => batch(args, prefs_path),
        Commands::Interactive(args) => interactive(args, prefs_path),
        Commands::Prefs(command) => manage_prefs(command, prefs_path),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn preview(args: RenderArgs, prefs_path: Option<&Path>) -> Result<()> {
    let prefs = args.settings.resolve(args.text, prefs_path)?;
    let output = GlyphRenderer::default().render(&prefs.request());
    println!("{output}");
    Ok(())
}

fn convert(args: ConvertArgs, prefs_path: Option<&Path>) -> Result<()> {
    let prefs = args.settings.resolve(args.text, prefs_path)?;
    let output = GlyphRenderer::default().render(&prefs.request());

    let mut file = fs::File::create(&args.output)
        .with_context(|| format!("failed to create {:?}", args.output))?;
    writeln!(file, "{output}")?;
    info!("wrote {:?}", args.output);
    Ok(())
}

fn copy(args: RenderArgs, prefs_path: Option<&Path>) -> Result<()> {
    let prefs = args.settings.resolve(args.text, prefs_path)?;
    let output = GlyphRenderer::default().render(&prefs.request());

    let notice = SystemClipboard::default().copy(&output);
    report_notice(&notice, &mut io::stderr())
}

/// Print `notice`, turning a failed one into the command's error.
fn report_notice<W: Write>(notice: &Notice, out: &mut W) -> Result<()> {
    writeln!(out, "{notice}")?;
    if !notice.is_success() {
        anyhow::bail!("{}", notice.text);
    }
    Ok(())
}

fn batch(args: BatchArgs, prefs_path: Option<&Path>) -> Result<()> {
    let prefs = args.settings.resolve(None, prefs_path)?;
    let renderer = GlyphRenderer::default();
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;
    let out_dir = fs::canonicalize(&args.out_dir)
        .with_context(|| format!("failed to resolve output directory {:?}", args.out_dir))?;

    let jobs: Vec<(PathBuf, PathBuf)> = collect_sources(&args.input, &args.extension, &out_dir)?
        .into_iter()
        .map(|(source, relative)| (source, output_path(&out_dir, &relative)))
        .collect();
    if let Some((_, target)) = jobs.iter().find(|(_, target)| jobs.iter().any(|(s, _)| s == target))
    {
        anyhow::bail!("refusing to overwrite input file {:?}", target);
    }

    let progress = ProgressBar::new(jobs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}",
        )?
        .progress_chars("=> "),
    );

    let mut skipped = 0;
    for (source, target) in jobs {
        let content = match fs::read_to_string(&source) {
            Ok(content) => content,
            Err(err) => {
                warn!("skipping {}: {err}", source.display());
                skipped += 1;
                progress.inc(1);
                continue;
            },
        };

        let mut request = prefs.request();
        let mut rendered = Vec::new();
        for line in content.lines() {
            request.input_text = line.to_owned();
            let output = renderer.render(&request);
            if !output.is_empty() {
                rendered.push(output);
            }
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {:?}", parent))?;
        }
        let mut file =
            fs::File::create(&target).with_context(|| format!("failed to create {:?}", target))?;
        writeln!(file, "{}", rendered.join("\n\n"))?;
        progress.inc(1);
    }

    progress.finish_with_message(format!(
        "Rendered files written to {:?} ({skipped} skipped)",
        args.out_dir
    ));
    Ok(())
}

/// `out_dir/<relative>.txt`, keeping the source extension so a render never
/// lands on its own source.
fn output_path(out_dir: &Path, relative: &Path) -> PathBuf {
    let mut target = out_dir.join(relative).into_os_string();
    target.push(".txt");
    PathBuf::from(target)
}

/// Source files paired with their path relative to the batch input. Paths are
/// canonical and nothing under `out_dir` is picked up.
fn collect_sources(
    input: &Path,
    extension: &str,
    out_dir: &Path,
) -> Result<Vec<(PathBuf, PathBuf)>> {
    if !input.exists() {
        anyhow::bail!("input {:?} does not exist", input);
    }
    let input =
        fs::canonicalize(input).with_context(|| format!("failed to resolve input {:?}", input))?;

    if !input.is_dir() {
        let name = input.file_name().with_context(|| format!("invalid input {:?}", input))?;
        return Ok(vec![(input.clone(), PathBuf::from(name))]);
    }
    if input == out_dir {
        anyhow::bail!("output directory {:?} must differ from the input directory", out_dir);
    }

    let mut entries: Vec<(PathBuf, PathBuf)> = WalkDir::new(&input)
        .into_iter()
        .filter_entry(|entry| entry.path() != out_dir)
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(&input).ok()?.to_path_buf();
            Some((entry.into_path(), relative))
        })
        .collect();
    entries.sort();

    if entries.is_empty() {
        anyhow::bail!("no .{} files found in {:?}", extension, input);
    }
    Ok(entries)
}

fn interactive(args: InteractiveArgs, prefs_path: Option<&Path>) -> Result<()> {
    let prefs = load_prefs(prefs_path)?;
    let mut session = Session::new(GlyphRenderer::new(standard()), prefs);

    eprintln!("Type text to render or :help for commands.");
    let mut clipboard = SystemClipboard::default();
    let stdin = io::stdin();
    session::run(&mut session, stdin.lock(), io::stdout().lock(), |text| clipboard.copy(text))?;

    if args.no_save {
        return Ok(());
    }
    keep_session_prefs(prefs_path, session.preferences())
}

/// Store what the session ended with. Without a preference location the
/// session still ends cleanly.
fn keep_session_prefs(path: Option<&Path>, prefs: &Preferences) -> Result<()> {
    match path {
        Some(path) => prefs.save(path),
        None => {
            warn!("no config directory found, session preferences not saved");
            Ok(())
        },
    }
}

fn manage_prefs(command: PrefsCommand, prefs_path: Option<&Path>) -> Result<()> {
    match command {
        PrefsCommand::Show => {
            let prefs = load_prefs(prefs_path)?;
            print!("{}", toml::to_string_pretty(&prefs).context("failed to encode preferences")?);
        },
        PrefsCommand::Path => match prefs_path {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("could not determine a preference file location"),
        },
        PrefsCommand::Set { key, value } => {
            let mut prefs = load_prefs(prefs_path)?;
            prefs.set(key, &value)?;
            save_prefs(prefs_path, &prefs)?;
        },
        PrefsCommand::Reset => save_prefs(prefs_path, &Preferences::default())?,
    }
    Ok(())
}

fn load_prefs(path: Option<&Path>) -> Result<Preferences> {
    match path {
        Some(path) => Preferences::load(path),
        None => {
            warn!("no config directory found, using default preferences");
            Ok(Preferences::default())
        },
    }
}

fn save_prefs(path: Option<&Path>, prefs: &Preferences) -> Result<()> {
    let path = path.context("could not determine a preference file location, pass --prefs")?;
    prefs.save(path)
}

fn parse_glyph(value: &str) -> Result<String, String> {
    if value.is_empty() {
        Err("glyph must not be empty".to_owned())
    } else {
        Ok(value.to_owned())
    }
}

impl RenderSettings {
    fn border(&self) -> Option<bool> {
        match (self.border, self.no_border) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Stored preferences with the command line overrides applied.
    fn resolve(&self, text: Option<String>, prefs_path: Option<&Path>) -> Result<Preferences> {
        let mut prefs = load_prefs(prefs_path)?;
        if let Some(text) = text {
            prefs.input_text = text;
        }
        if let Some(inner) = &self.inner {
            prefs.inner_glyph = inner.clone();
        }
        if let Some(outer) = &self.outer {
            prefs.outer_glyph = outer.clone();
        }
        if let Some(border) = self.border() {
            prefs.with_border = border;
        }

        if self.save {
            save_prefs(prefs_path, &prefs)?;
        }
        Ok(prefs)
    }
}
