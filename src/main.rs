use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use ipa_reader::cli::{Cli, Commands, ConfigAction, ConvertArgs};
use ipa_reader::config::Config;
use ipa_reader::dictionary::DictionaryHandle;
use ipa_reader::engine::{Chapter, ConvertedChapter, Converter, convert_chapters};
use ipa_reader::output::{self, Verbosity};
use ipa_reader::phonetics::render::{HtmlMarkup, Markup, MarkupFormat};
use ipa_reader::phonetics::resolver::{ResolveReport, add_monosyllabic_stress, transcribe};
use owo_colors::OwoColorize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::new(cli.quiet, cli.verbose);

    match cli.command {
        Commands::Convert(args) => {
            let config = load_config(cli.config.as_deref())?;
            run_convert(config, args, verbosity).await?;
        }
        Commands::Lookup { words, dictionary } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(path) = dictionary {
                config.dictionary.path = Some(path);
            }
            run_lookup(config.dictionary_path()?, &words, verbosity).await?;
        }
        Commands::Config { action } => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "ipa-reader",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = match custom_path {
        Some(path) => Config::load(path)?,
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(&path)?,
            None => Config::default(),
        },
    };

    Ok(config.with_env_overrides())
}

/// Command-line flags win over the config file.
fn apply_convert_args(config: &mut Config, args: &ConvertArgs) {
    if let Some(path) = &args.dictionary {
        config.dictionary.path = Some(path.clone());
    }
    if let Some(mode) = args.stress {
        config.display.stress_mode = mode;
    }
    if let Some(format) = args.format {
        config.markup.format = format;
    }
    config.display.show_aspiration |= args.aspiration;
    config.display.show_flapping |= args.flapping;
    config.display.show_glottal_stop |= args.glottal_stop;
    if args.plain {
        config.display.show_ipa = false;
    }
}

async fn run_convert(mut config: Config, args: ConvertArgs, verbosity: Verbosity) -> Result<()> {
    apply_convert_args(&mut config, &args);

    if !config.display.show_ipa {
        for chapter in read_chapters(&args.files)? {
            print!("{}", chapter.text);
        }
        return Ok(());
    }

    // Start the load first so parsing overlaps with reading the input.
    let path = config.dictionary_path()?.to_path_buf();
    let handle = DictionaryHandle::new();
    let started = Instant::now();
    let task = handle.spawn_load(path.clone());

    let chapters = read_chapters(&args.files)?;

    let dictionary = match task.await.context("Dictionary load task failed")? {
        Ok(dictionary) => {
            output::report_dictionary_loaded(verbosity, &path, dictionary.len(), started.elapsed());
            dictionary
        }
        Err(e) => {
            output::report_dictionary_failed(verbosity, &path, &e.to_string());
            return Err(e.into());
        }
    };

    let format = config.markup.format;
    let converter = Arc::new(Converter::new(config.build_markup()));
    let multiple = chapters.len() > 1;
    let converted = convert_chapters(
        converter,
        dictionary,
        chapters,
        config.conversion_options(),
    )
    .await?;

    let mut total = ResolveReport::default();
    for chapter in &converted {
        print_chapter(chapter, format, multiple);
        output::report_conversion(verbosity, &chapter.title, &chapter.report);
        total.merge(&chapter.report);
    }
    if multiple {
        output::report_conversion(verbosity, "total", &total);
    }

    Ok(())
}

/// One chapter per file, or a single stdin chapter.
fn read_chapters(files: &[PathBuf]) -> Result<Vec<Chapter>> {
    if files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(vec![Chapter::new("stdin", text)]);
    }

    files
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let title = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(Chapter::new(title, text))
        })
        .collect()
}

fn print_chapter(chapter: &ConvertedChapter, format: MarkupFormat, with_heading: bool) {
    if with_heading {
        match format {
            MarkupFormat::Html => {
                let mut title = String::new();
                let html = HtmlMarkup::default();
                for c in chapter.title.chars() {
                    html.write_char(c, &mut title);
                }
                println!("<h2>{}</h2>", title);
            }
            MarkupFormat::Ansi => println!("{}", chapter.title.bold()),
            MarkupFormat::Plain => println!("== {} ==", chapter.title),
        }
    }
    print!("{}", chapter.markup);
    if !chapter.markup.ends_with('\n') {
        println!();
    }
}

async fn run_lookup(path: &Path, words: &[String], verbosity: Verbosity) -> Result<()> {
    let handle = DictionaryHandle::new();
    let started = Instant::now();
    let dictionary = match handle.load_file(path.to_path_buf()).await {
        Ok(dictionary) => dictionary,
        Err(e) => {
            output::report_dictionary_failed(verbosity, path, &e.to_string());
            return Err(e.into());
        }
    };
    output::report_dictionary_loaded(verbosity, path, dictionary.len(), started.elapsed());

    for word in words {
        match dictionary.lookup(word) {
            Some(raw) => match transcribe(raw) {
                Ok(ipa) => println!("{}\t{}", word, add_monosyllabic_stress(&ipa, word)),
                Err(e) => println!("{}\t{}", word, format!("(malformed: {})", e).red()),
            },
            None => println!("{}\t{}", word, "(not found)".dimmed()),
        }
    }

    Ok(())
}

fn handle_config_command(action: ConfigAction, custom_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(custom_path)?;
            match config.get_value_by_path(&key) {
                Ok(value) => println!("{}", value),
                Err(e) => {
                    eprintln!("{}", format!("Error: {}", e).red());
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::List => {
            let config = load_config(custom_path)?;
            print!(
                "{}",
                toml::to_string_pretty(&config).context("Failed to serialize config")?
            );
        }
        ConfigAction::Dump => {
            print!("{}", Config::dump_template());
        }
        ConfigAction::Path => {
            let path = custom_path
                .map(Path::to_path_buf)
                .or_else(Config::default_path)
                .context("No configuration directory for this platform")?;
            let status = if path.exists() {
                "exists".green().to_string()
            } else {
                "not created".dimmed().to_string()
            };
            println!("{} ({})", path.display(), status);
        }
    }

    Ok(())
}
