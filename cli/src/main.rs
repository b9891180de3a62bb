//! marknote CLI - Markdown note rendering and export tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use marknote::workspace::{export_workspace_with, NEW_NOTE_TEMPLATE};
use marknote::{
    parse, to_json, FsNoteStore, JsonFormat, NoteNode, NoteStore, RenderOptions, RenderStats,
    ScanOptions,
};

#[derive(Parser)]
#[command(name = "marknote")]
#[command(version)]
#[command(about = "Render, browse and export Markdown notes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown note to HTML
    Render {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Omit the line-number gutter on code blocks
        #[arg(long, env = "MARKNOTE_NO_LINE_NUMBERS")]
        no_line_numbers: bool,

        /// Wrap the fragment in a complete HTML page
        #[arg(long, env = "MARKNOTE_STANDALONE")]
        standalone: bool,

        /// Page title for standalone output
        #[arg(long)]
        title: Option<String>,
    },

    /// Show the note tree of a workspace
    Tree {
        /// Workspace directory
        #[arg(value_name = "DIR", env = "MARKNOTE_WORKSPACE")]
        dir: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,

        /// Include hidden files and directories
        #[arg(long)]
        hidden: bool,
    },

    /// Create a new note from the default template
    New {
        /// Workspace directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Note name (".md" is appended when missing)
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Show note statistics
    Info {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Export every note of a workspace to standalone HTML pages
    Export {
        /// Workspace directory
        #[arg(value_name = "DIR", env = "MARKNOTE_WORKSPACE")]
        dir: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", env = "MARKNOTE_EXPORT_DIR")]
        output: Option<PathBuf>,

        /// Omit the line-number gutter on code blocks
        #[arg(long, env = "MARKNOTE_NO_LINE_NUMBERS")]
        no_line_numbers: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            no_line_numbers,
            standalone,
            title,
        }) => cmd_render(&input, output.as_deref(), !no_line_numbers, standalone, title),
        Some(Commands::Tree { dir, json, hidden }) => cmd_tree(&dir, json, hidden),
        Some(Commands::New { dir, name }) => cmd_new(&dir, &name),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Export {
            dir,
            output,
            no_line_numbers,
        }) => cmd_export(&dir, output.as_deref(), !no_line_numbers),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: marknote <COMMAND>".yellow());
            println!("       marknote --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    line_numbers: bool,
    standalone: bool,
    title: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = RenderOptions::new()
        .with_line_numbers(line_numbers)
        .with_standalone(standalone);
    if let Some(title) = title {
        options = options.with_title(title);
    }
    log::debug!("Rendering {} with {:?}", input.display(), options);

    let html = marknote::render_file(input, &options)?;

    if let Some(path) = output {
        fs::write(path, &html)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", html);
    }

    Ok(())
}

fn cmd_tree(dir: &Path, json: bool, hidden: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = FsNoteStore::open(dir)?;
    let tree = store.scan(&ScanOptions::new().with_hidden(hidden))?;

    if json {
        println!("{}", to_json(&tree, JsonFormat::Pretty)?);
        return Ok(());
    }

    println!("{}", dir.display().to_string().cyan().bold());
    print_children(tree.root.children(), "");
    println!(
        "\n{} {}",
        tree.file_count().to_string().bold(),
        "notes".dimmed()
    );
    Ok(())
}

fn print_children(children: &[NoteNode], prefix: &str) {
    for (i, node) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let branch = if last { "└─" } else { "├─" };
        if node.is_dir() {
            println!("{}{} {}/", prefix, branch.dimmed(), node.name().blue().bold());
            let nested = format!("{}{}  ", prefix, if last { " " } else { "│" });
            print_children(node.children(), &nested);
        } else {
            println!("{}{} {}", prefix, branch.dimmed(), node.name());
        }
    }
}

fn cmd_new(dir: &Path, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = FsNoteStore::open(dir)?;
    let path = store.create("", name, NEW_NOTE_TEMPLATE)?;
    log::debug!("Created note {} in {}", path, store.root().display());
    println!("{} {}", "Created".green(), store.root().join(&path).display());
    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let doc = parse(&text);
    let mut stats = RenderStats::from_document(&doc);
    stats.count_text(&text);

    if json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "title": doc.title(),
            "headings": doc
                .headings()
                .map(|(level, text)| serde_json::json!({ "level": level, "text": text }))
                .collect::<Vec<_>>(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Note Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(title) = doc.title() {
        println!("{}: {}", "Title".bold(), title);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);

    let outline: Vec<_> = doc.headings().collect();
    if !outline.is_empty() {
        println!();
        println!("{}", "Outline".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (level, text) in outline {
            let indent = "  ".repeat(usize::from(level.saturating_sub(1)));
            println!("{}{}", indent, text);
        }
    }

    Ok(())
}

fn cmd_export(
    dir: &Path,
    output: Option<&Path>,
    line_numbers: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = FsNoteStore::open(dir)?;
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = dir.file_name().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_html", stem))
    });

    let total = store.scan(&ScanOptions::default())?.file_count();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let options = RenderOptions::new().with_line_numbers(line_numbers);
    log::debug!(
        "Exporting {} notes from {} to {} with {:?}",
        total,
        dir.display(),
        output_dir.display(),
        options
    );
    let report = export_workspace_with(&store, &output_dir, &options, |note| {
        pb.set_message(note.to_string());
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} notes to {}",
        "Exported".green().bold(),
        report.exported.len(),
        output_dir.display()
    );
    for (note, error) in &report.failed {
        println!("  {} {}: {}", "✗".red(), note, error);
    }
    println!(
        "  {} {} words, {} code blocks, {} tables",
        "└─".dimmed(),
        report.stats.word_count,
        report.stats.code_block_count,
        report.stats.table_count
    );

    if !report.is_complete() {
        return Err(format!("{} notes failed to export", report.failed.len()).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "marknote".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown note rendering and export tool");
    println!();
    println!("License: MIT");
}
