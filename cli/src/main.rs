//! lyrics2pptx CLI - lyrics text to PowerPoint slides
//!
//! Reads a lyrics file (title on the first line, blank-line-separated
//! verses after it) and writes one styled slide per verse.

mod platform;

use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use lyrics2pptx::{GenerateOptions, Rgb};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

const BANNER: &str = r"
   __         _         ___            __
  / /_ ______(_)______ |_  |___  ___  / /_
 / / // / __/ / __(_-</ __// _ \/ _ \/ __/
/_/\_, /_/ /_/\__/___/____/ .__/ .__/\__/
  /___/                  /_/  /_/
";

/// Width of the value column in the settings summary.
const VALUE_WIDTH: usize = 12;

/// Generate a PowerPoint presentation from a lyrics text file
#[derive(Parser)]
#[command(
    name = "lyrics2pptx",
    author = "Astra <astralee95@gmail.com>",
    version,
    about = "Generate a PowerPoint presentation from a lyrics text file",
    long_about = "lyrics2pptx - Turn a lyrics text file into a slide deck.\n\n\
                  The first line is the song title; every blank-line-separated block\n\
                  after it becomes one slide.\n\n\
                  Example:\n  lyrics2pptx --input input.txt"
)]
struct Cli {
    /// Path to the input lyrics text file
    #[arg(long, default_value = "input.txt")]
    input: PathBuf,

    /// Output PowerPoint file (default: <title>.pptx)
    #[arg(long)]
    output: Option<String>,

    /// Background image; replaces the background color
    #[arg(long = "bg-image")]
    bg_image: Option<PathBuf>,

    /// Background color name
    #[arg(long = "bg-color", default_value = "default")]
    bg_color: String,

    /// Title and body font color name
    #[arg(long = "font-color", default_value = "white")]
    font_color: String,

    /// Title and body font size in points
    #[arg(long = "font-size", default_value_t = 48.0)]
    font_size: f64,

    /// Background image transparency (0.0 invisible, 1.0 original)
    #[arg(long, default_value_t = 0.5)]
    transparency: f64,

    /// Print the deck outline as JSON without writing a file
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> GenerateOptions {
        let mut options = GenerateOptions::new()
            .with_input(&self.input)
            .with_background_color(&self.bg_color)
            .with_font_color(&self.font_color)
            .with_font_size(self.font_size)
            .with_transparency(self.transparency);
        if let Some(output) = &self.output {
            options = options.with_output(output);
        }
        if let Some(image) = &self.bg_image {
            options = options.with_background_image(image);
        }
        options
    }
}

fn main() {
    platform::enable_virtual_terminal();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.options();
    tracing::debug!("Options: {:?}", options);

    if cli.dry_run {
        let deck = lyrics2pptx::plan(&options)?;
        println!("{}", deck.to_json()?);
        return Ok(());
    }

    print_welcome();
    print_settings(&cli);

    // Reject unknown colors before anything is generated
    options.validate()?;

    println!("{}\n", "Generating PowerPoint presentation...".yellow().bold());
    let pb = create_spinner("Building slides...");
    let result = lyrics2pptx::generate(&options);
    pb.finish_and_clear();
    let generated = result?;

    println!(
        "{} {} {}",
        "✓".green().bold(),
        "Successfully saved PowerPoint presentation to".green().bold(),
        generated.output_path.display().to_string().blue().bold()
    );
    println!(
        "{}",
        format!(
            "\nPowerPoint presentation generation completed ({} slides).",
            generated.slide_count
        )
        .yellow()
        .bold()
    );

    Ok(())
}

fn print_welcome() {
    println!("{}", BANNER.yellow().bold());
    println!("{}\n", "Welcome to the PowerPoint Generator!".yellow().reversed());
    println!("{}", "Example: copy the command below into your terminal.".truecolor(255, 135, 0));
    println!("{}\n", "lyrics2pptx --input input.txt".truecolor(255, 135, 0).bold());
}

fn print_settings(cli: &Cli) {
    let background = lyrics2pptx::resolve_color(&cli.bg_color).ok();
    let font = lyrics2pptx::resolve_color(&cli.font_color).ok();

    println!("{}", "*".repeat(21).dimmed());
    print_setting("Input file", &cli.input.display().to_string(), "lyrics text file");

    let output = match &cli.output {
        Some(output) if !output.is_empty() => output.clone(),
        _ => derived_output_name(cli),
    };
    print_setting("Output file", &output, "defaults to the song title");
    println!();

    print_setting_colored(
        "Background color",
        swatch(&cli.bg_color, None, background),
        "default: blue-purple",
    );
    print_setting_colored(
        "Font color",
        swatch(&cli.font_color, font, None),
        "default: white",
    );
    print_setting_colored(
        "Font preview",
        swatch("PREVIEW", font, background),
        &format!("options: {}", lyrics2pptx::color_names().join(", ")),
    );
    println!();

    print_setting("Font size", &cli.font_size.to_string(), "title & body, default: 48");
    println!();

    let image = cli
        .bg_image
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "X".to_string());
    print_setting("Background image", &image, "default: none");
    print_setting(
        "Transparency",
        &cli.transparency.to_string(),
        "applies to the background image",
    );
    println!("{}\n", "*".repeat(21).dimmed());
}

/// `<title>.pptx` from the input's first line, if the input can be read.
fn derived_output_name(cli: &Cli) -> String {
    std::fs::read_to_string(&cli.input)
        .ok()
        .and_then(|text| lyrics2pptx::segment(&text).ok())
        .map(|lyrics| {
            lyrics2pptx::resolve_output_name(None, &lyrics.title)
                .display()
                .to_string()
        })
        .unwrap_or_else(|| "<title>.pptx".to_string())
}

fn print_setting(label: &str, value: &str, hint: &str) {
    print_setting_colored(label, pad(value).italic(), hint);
}

fn print_setting_colored(label: &str, value: ColoredString, hint: &str) {
    println!("{:<16}: {} {}", label, value, format!("({})", hint).dimmed());
}

/// `text` padded to the value column, drawn in the given colors.
fn swatch(text: &str, foreground: Option<Rgb>, background: Option<Rgb>) -> ColoredString {
    let mut styled = pad(text).italic();
    if let Some(fg) = foreground {
        styled = styled.truecolor(fg.r(), fg.g(), fg.b());
    }
    if let Some(bg) = background {
        styled = styled.on_truecolor(bg.r(), bg.g(), bg.b());
    }
    styled
}

/// Left-align `text` to the value column by display width.
fn pad(text: &str) -> String {
    let width = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(VALUE_WIDTH.saturating_sub(width)))
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["lyrics2pptx"]);
        assert_eq!(cli.input, PathBuf::from("input.txt"));
        assert_eq!(cli.bg_color, "default");
        assert_eq!(cli.font_color, "white");
        assert_eq!(cli.font_size, 48.0);
        assert_eq!(cli.transparency, 0.5);
        assert!(cli.output.is_none());
        assert!(cli.bg_image.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_options_from_flags() {
        let cli = Cli::parse_from([
            "lyrics2pptx",
            "--input",
            "song.txt",
            "--output",
            "deck",
            "--bg-image",
            "bg.jpg",
            "--font-color",
            "yellow",
            "--font-size",
            "40",
            "--transparency",
            "0.25",
        ]);
        let options = cli.options();
        assert_eq!(options.input, PathBuf::from("song.txt"));
        assert_eq!(options.output.as_deref(), Some("deck"));
        assert_eq!(options.background_image, Some(PathBuf::from("bg.jpg")));
        assert_eq!(options.font_color, "yellow");
        assert_eq!(options.font_size, 40.0);
        assert_eq!(options.transparency, 0.25);
    }

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("abc").len(), VALUE_WIDTH);
        // Wide characters take two columns each
        assert_eq!(pad("歌詞"), format!("歌詞{}", " ".repeat(VALUE_WIDTH - 4)));
        assert_eq!(pad("a-very-long-file-name.txt"), "a-very-long-file-name.txt");
    }
}
