use crate::config::load_config;
use crate::interaction::{clear_highlight, focus_transform, highlight_for, reset_transform};
use crate::ir::{Catalog, CourseId, Filters};
use crate::layout::{LayoutError, compute_layout};
use crate::layout_dump::{layout_to_json, write_layout_dump};
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cgraph", version, about = "Lay out course prerequisite graphs")]
pub struct Args {
    /// Catalog JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Restrict to one career
    #[arg(long)]
    pub career: Option<u32>,

    /// Add a profile's courses; needs --career
    #[arg(long)]
    pub profile: Option<u32>,

    /// Keep the baseline course in the graph
    #[arg(long = "show-baseline")]
    pub show_baseline: bool,

    /// Use the compact box size
    #[arg(long = "focus-mode")]
    pub focus_mode: bool,

    /// Highlight the edges around a course
    #[arg(long)]
    pub highlight: Option<CourseId>,

    /// Center the view on a course
    #[arg(long)]
    pub focus: Option<CourseId>,

    /// Viewport width [default: 1200]
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Viewport height [default: 800]
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Svg,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing();
    execute(&args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn execute(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.viewport.width = width;
    }
    if let Some(height) = args.height {
        config.viewport.height = height;
    }
    config.layout.focus_mode |= args.focus_mode;

    let catalog = Catalog::from_json(&read_input(args.input.as_deref())?)?;
    let filters = Filters {
        career: args.career,
        profile: args.profile,
        show_baseline: args.show_baseline,
    };
    debug!(courses = catalog.courses.len(), ?filters, "catalog loaded");

    let layout = compute_layout(
        &catalog,
        &filters,
        &config.theme,
        &config.layout,
        config.viewport,
    )?;
    let states = match args.highlight {
        Some(node) if layout.node(node).is_some() => highlight_for(&layout.edges, node),
        Some(node) => return Err(LayoutError::UnknownNode(node).into()),
        None => clear_highlight(&layout.edges),
    };
    let transform = match args.focus {
        Some(node) => focus_transform(&layout, node, config.viewport, &config.view)?,
        None => reset_transform(),
    };

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &states, transform, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &layout, &states, transform)?,
            None => println!("{}", layout_to_json(&layout, &states, transform)?),
        },
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_flags() {
        let args = Args::try_parse_from([
            "cgraph",
            "-i",
            "catalog.json",
            "-e",
            "json",
            "--career",
            "2",
            "--profile",
            "5",
            "--show-baseline",
            "--highlight",
            "14",
            "-H",
            "600",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.career, Some(2));
        assert_eq!(args.profile, Some(5));
        assert!(args.show_baseline);
        assert!(!args.focus_mode);
        assert_eq!(args.highlight, Some(14));
        assert_eq!(args.height, Some(600.0));
        assert_eq!(args.width, None);
    }

    #[test]
    fn writes_json_dump_to_file() {
        let dir = std::env::temp_dir().join(format!("cgraph-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("catalog.json");
        let output = dir.join("layout.json");
        std::fs::write(
            &input,
            r#"[{"id": 1, "name": "Calculo I"}, {"id": 2, "name": "Calculo II", "previas_aprobado": [{"id": 1}]}]"#,
        )
        .unwrap();
        let args = Args::try_parse_from([
            "cgraph",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-e",
            "json",
            "--focus",
            "2",
        ])
        .unwrap();
        execute(&args).unwrap();
        let dump: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(dump["nodes"].as_array().map(Vec::len), Some(2));
        assert_eq!(dump["transform"]["scale"], 1.2);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unknown_highlight_is_an_error() {
        let dir = std::env::temp_dir().join(format!("cgraph-cli-hl-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("catalog.json");
        std::fs::write(&input, r#"[{"id": 1, "name": "Calculo I"}]"#).unwrap();
        let args = Args::try_parse_from([
            "cgraph",
            "-i",
            input.to_str().unwrap(),
            "--highlight",
            "9",
        ])
        .unwrap();
        let err = execute(&args).unwrap_err();
        assert!(err.to_string().contains('9'));
        std::fs::remove_dir_all(&dir).ok();
    }
}
