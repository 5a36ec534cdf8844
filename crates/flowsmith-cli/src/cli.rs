//! Command-line interface for the flowsmith utility
//!
//! Works on saved diagram documents: export them as Mermaid text, re-run the
//! layout, validate them or summarize their contents.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use flowsmith::core::logging::init_logging;
use flowsmith::flowchart::{FlowchartStore, LayeredLayout, LayoutConfig};
use flowsmith::{CurveStyle, DiagramSettings, Direction, Look, Theme};

/// Flowsmith - Work with flowchart diagram documents
#[derive(Parser)]
#[command(name = "flowsmith")]
#[command(about = "Export, lay out and validate flowchart diagram documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export a diagram document as Mermaid flowchart text
    Export {
        /// Input diagram document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the Mermaid text (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Flow direction (TD, LR, BT, RL)
        #[arg(short, long, default_value_t = Direction::TopDown)]
        direction: Direction,

        /// Color theme (default, dark, forest, neutral, base)
        #[arg(long, default_value_t = Theme::Default)]
        theme: Theme,

        /// Drawing look (classic, handDrawn)
        #[arg(long, default_value_t = Look::Classic)]
        look: Look,

        /// Edge curve style (basis, linear, stepAfter, ...)
        #[arg(long, default_value_t = CurveStyle::Basis)]
        curve: CurveStyle,

        /// Re-run the layout before exporting
        #[arg(long)]
        layout: bool,
    },

    /// Re-run the layout and write the updated document
    Layout {
        /// Input diagram document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the document (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Flow direction (TD, LR, BT, RL)
        #[arg(short, long, default_value_t = Direction::TopDown)]
        direction: Direction,
    },

    /// Check that a diagram document loads
    Validate {
        /// Input diagram document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Summarize a diagram document
    Info {
        /// Input diagram document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Main CLI application
pub struct FlowsmithApp {
    layout: LayeredLayout,
}

impl FlowsmithApp {
    /// Create a new application instance with the default layout
    pub fn new() -> Self {
        Self::with_layout_config(LayoutConfig::default())
    }

    pub fn with_layout_config(config: LayoutConfig) -> Self {
        Self {
            layout: LayeredLayout::with_config(config),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level_str = std::env::var("FLOWSMITH_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var("FLOWSMITH_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Flowsmith v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Export {
                input,
                output,
                direction,
                theme,
                look,
                curve,
                layout,
            } => {
                let settings = DiagramSettings {
                    direction,
                    theme,
                    look,
                    curve_style: curve,
                };
                self.export_command(input, output, settings, layout, cli.verbose)
            }
            Commands::Layout {
                input,
                output,
                direction,
            } => self.layout_command(input, output, direction, cli.verbose),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
            Commands::Info { input, json } => self.info_command(input, json, cli.verbose),
        }
    }

    /// Read and load a document into a fresh store
    fn open(&self, input: Option<PathBuf>, verbose: bool) -> Result<FlowchartStore> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let mut store = FlowchartStore::new();
        store.load_json(&content)?;
        Ok(store)
    }

    /// Handle the export command
    fn export_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        settings: DiagramSettings,
        layout: bool,
        verbose: bool,
    ) -> Result<()> {
        let mut store = self.open(input, verbose)?;
        store.set_settings(settings);

        if layout {
            store
                .auto_layout(&self.layout)
                .context("Failed to lay out diagram")?;
        }

        let text = store.serialize();
        if verbose {
            eprintln!(
                "Exported {} nodes and {} edges",
                store.nodes().len(),
                store.edges().len()
            );
        }
        self.write_output(output, &text)
    }

    /// Handle the layout command
    fn layout_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        direction: Direction,
        verbose: bool,
    ) -> Result<()> {
        let mut store = self.open(input, verbose)?;
        let changed = store
            .set_direction_and_layout(direction, &self.layout)
            .context("Failed to lay out diagram")?;
        debug!(changed, direction = %direction, "Layout command finished");

        if verbose {
            eprintln!("Laid out {} nodes ({})", store.nodes().len(), direction);
        }
        let json = store.save_json()?;
        self.write_output(output, &json)
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        match self.open(input, verbose) {
            Ok(store) => {
                println!(
                    "✓ Valid diagram ({} nodes, {} edges)",
                    store.nodes().len(),
                    store.edges().len()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid diagram: {}", e);
                Err(e)
            }
        }
    }

    /// Handle the info command
    fn info_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let store = self.open(input, verbose)?;
        let graph = store.graph();
        let dangling = graph.dangling_edges().count();
        let styled = graph.nodes.iter().filter(|n| n.data.has_custom_colors()).count();

        if json {
            let info = serde_json::json!({
                "nodes": graph.nodes.len(),
                "edges": graph.edges.len(),
                "dangling_edges": dangling,
                "styled_nodes": styled,
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            println!("Nodes:          {}", graph.nodes.len());
            println!("Edges:          {}", graph.edges.len());
            println!("Dangling edges: {}", dangling);
            println!("Styled nodes:   {}", styled);
        }

        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for FlowsmithApp {
    fn default() -> Self {
        Self::new()
    }
}
