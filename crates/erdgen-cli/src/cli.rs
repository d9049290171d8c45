//! Command-line interface for the erdgen utility
//!
//! Reads a draw.io diagram, runs the generation pipeline and writes one
//! Java file per entity.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use erdgen::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use erdgen::{Entity, GeneratorError, Orchestrator, ResolutionReport, ResolvedModel};

/// Diagram read when no input path is given
pub const DEFAULT_INPUT: &str = "demos/default/model_soccer.drawio";

/// Directory written when no output directory is given
pub const DEFAULT_OUTPUT_DIR: &str = "demos/default/src-gen";

/// erdgen - Generate Java classes from draw.io entity-relationship diagrams
#[derive(Parser)]
#[command(name = "erdgen")]
#[command(about = "Generate Java classes from draw.io entity-relationship diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
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
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
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
    /// Generate one Java class per diagram entity
    Generate {
        /// draw.io diagram to read
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Directory for the generated sources (created if absent)
        #[arg(default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
    },

    /// Show the resolved class model without writing files
    Inspect {
        /// draw.io diagram to read
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// JSON shape of the inspect command
#[derive(Serialize)]
struct InspectOutput<'a> {
    entities: Vec<&'a Entity>,
    report: &'a ResolutionReport,
}

/// Main CLI application
pub struct ErdgenApp {
    orchestrator: Orchestrator,
}

impl ErdgenApp {
    pub fn new() -> Self {
        Self {
            orchestrator: Orchestrator::new(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());
        let log_format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("erdgen v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate { input, output_dir } => {
                self.generate_command(&input, &output_dir, cli.verbose)
            }
            Commands::Inspect { input, json } => self.inspect_command(&input, json, cli.verbose),
        }
    }

    /// Handle the generate command
    pub fn generate_command(&self, input: &Path, output_dir: &Path, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes from {}", content.len(), input.display());
        }

        let generation = self.orchestrator.process(&content)?;
        let written = self.write_classes(output_dir, &generation.classes)?;

        let report = &generation.report;
        if report.skipped_edges() > 0 && verbose {
            eprintln!(
                "Skipped {} edge(s) that do not connect two entities",
                report.skipped_edges()
            );
        }

        println!(
            "Generated {} classes into {}",
            written.len(),
            output_dir.display()
        );
        Ok(())
    }

    /// Handle the inspect command
    pub fn inspect_command(&self, input: &Path, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes from {}", content.len(), input.display());
        }

        let model = self.orchestrator.resolve(&content)?;
        if json {
            println!("{}", Self::inspect_json(&model)?);
        } else {
            print!("{}", Self::inspect_text(&model));
        }
        Ok(())
    }

    fn inspect_json(model: &ResolvedModel) -> Result<String> {
        let output = InspectOutput {
            entities: model.entities().collect(),
            report: &model.report,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }

    fn inspect_text(model: &ResolvedModel) -> String {
        let mut out = String::new();
        out.push_str(&format!("Entities: {}\n", model.entity_count()));
        for entity in model.entities() {
            match &entity.parent_name {
                Some(parent) => out.push_str(&format!("  {} extends {}\n", entity.name, parent)),
                None => out.push_str(&format!("  {}\n", entity.name)),
            }
            if !entity.children.is_empty() {
                out.push_str(&format!("    children: {}\n", entity.children.join(", ")));
            }
            for field in &entity.fields {
                out.push_str(&format!(
                    "    {}: {} [{}]\n",
                    field.name, field.field_type, field.cardinality
                ));
            }
        }

        let report = &model.report;
        out.push_str(&format!(
            "Inheritance links: {}, fields: {}, skipped edges: {}\n",
            report.inheritance_links,
            report.fields_added,
            report.skipped_edges()
        ));
        for change in &report.overwritten_parents {
            out.push_str(&format!(
                "  warning: {} extends {} (replaced {})\n",
                change.child, change.current, change.previous
            ));
        }
        for duplicate in &report.duplicate_fields {
            out.push_str(&format!(
                "  warning: {} declares field {} more than once\n",
                duplicate.entity, duplicate.field
            ));
        }
        out
    }

    /// Read the diagram, refusing paths that do not exist
    pub fn read_input(&self, input: &Path) -> Result<String> {
        if !input.exists() {
            return Err(GeneratorError::input_not_found(input).into());
        }
        let content = fs::read_to_string(input).map_err(GeneratorError::from)?;
        Ok(content)
    }

    /// Write each class to `<output_dir>/<Name>.java`, creating the directory
    pub fn write_classes(
        &self,
        output_dir: &Path,
        classes: &[erdgen::plugins::java::GeneratedClass],
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(output_dir).map_err(|e| {
            anyhow!(
                "Failed to create output directory '{}': {}",
                output_dir.display(),
                e
            )
        })?;

        let mut written = Vec::with_capacity(classes.len());
        for class in classes {
            let path = output_dir.join(&class.file_name);
            fs::write(&path, &class.source)
                .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
            info!("Generated: {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

impl Default for ErdgenApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    const DIAGRAM: &str = r#"<mxfile><diagram id="d" name="Page-1"><mxGraphModel><root>
<mxCell id="0"/>
<mxCell id="1" parent="0"/>
<mxCell id="t1" value="Team" style="whiteSpace=wrap;html=1;" vertex="1" parent="1"/>
<mxCell id="p1" value="Player" style="whiteSpace=wrap;html=1;" vertex="1" parent="1"/>
<mxCell id="g1" value="Goalkeeper" style="whiteSpace=wrap;html=1;" vertex="1" parent="1"/>
<mxCell id="e1" style="endArrow=classic;html=1;" edge="1" parent="1" source="t1" target="p1"/>
<mxCell id="l1" value="has&#xa;1 : *" style="edgeLabel;html=1;" vertex="1" connectable="0" parent="e1"/>
<mxCell id="e2" style="endArrow=block;endFill=0;html=1;" edge="1" parent="1" source="g1" target="p1"/>
</root></mxGraphModel></diagram></mxfile>"#;

    #[test]
    fn test_cli_parsing_generate_with_paths() {
        let cli = Cli::try_parse_from(["erdgen", "generate", "model.drawio", "out"]).unwrap();

        match cli.command {
            Commands::Generate { input, output_dir } => {
                assert_eq!(input, PathBuf::from("model.drawio"));
                assert_eq!(output_dir, PathBuf::from("out"));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parsing_generate_defaults() {
        let cli = Cli::try_parse_from(["erdgen", "generate"]).unwrap();

        match cli.command {
            Commands::Generate { input, output_dir } => {
                assert_eq!(input, PathBuf::from(DEFAULT_INPUT));
                assert_eq!(output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
            }
            _ => panic!("Expected Generate command"),
        }
        assert_eq!(cli.log_level, LogLevel::Info);
        assert_eq!(cli.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_cli_parsing_inspect_json() {
        let cli = Cli::try_parse_from(["erdgen", "inspect", "model.drawio", "--json"]).unwrap();

        match cli.command {
            Commands::Inspect { input, json } => {
                assert_eq!(input, PathBuf::from("model.drawio"));
                assert!(json);
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "erdgen",
            "generate",
            "--verbose",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format.as_str(), "json");
    }

    #[test]
    fn test_generate_writes_one_file_per_entity() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("model.drawio");
        fs::write(&input, DIAGRAM).unwrap();
        let output_dir = dir.path().join("src-gen").join("nested");

        let app = ErdgenApp::new();
        app.generate_command(&input, &output_dir, false).unwrap();

        let mut files: Vec<_> = fs::read_dir(&output_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();
        assert_eq!(files, vec!["Goalkeeper.java", "Player.java", "Team.java"]);

        let team = fs::read_to_string(output_dir.join("Team.java")).unwrap();
        assert!(team.starts_with("import java.util.List;\nimport java.util.ArrayList;\n\n"));
        assert!(team.contains("    private List<Player> has;"));

        let keeper = fs::read_to_string(output_dir.join("Goalkeeper.java")).unwrap();
        assert!(keeper.starts_with("public class Goalkeeper extends Player {"));
    }

    #[test]
    fn test_missing_input_creates_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("absent.drawio");
        let output_dir = dir.path().join("out");

        let err = ErdgenApp::new()
            .generate_command(&input, &output_dir, false)
            .unwrap_err();

        assert!(err.to_string().starts_with("Input file not found:"));
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_unreadable_input_is_an_io_error() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("out");

        // A directory exists but cannot be read as a file
        let err = ErdgenApp::new()
            .generate_command(dir.path(), &output_dir, false)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GeneratorError>(),
            Some(GeneratorError::Io { .. })
        ));
        assert!(err.to_string().starts_with("IO error:"));
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_malformed_input_creates_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.drawio");
        fs::write(&input, "<mxfile><diagram>").unwrap();
        let output_dir = dir.path().join("out");

        let result = ErdgenApp::new().generate_command(&input, &output_dir, false);

        assert!(result.is_err());
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_inspect_text_lists_entities_and_fields() {
        let model = Orchestrator::new().resolve(DIAGRAM).unwrap();
        let text = ErdgenApp::inspect_text(&model);

        assert!(text.starts_with("Entities: 3\n"));
        assert!(text.contains("  Team\n    has: List<Player> [1 : *]\n"));
        assert!(text.contains("  Goalkeeper extends Player\n"));
        assert!(text.contains("    children: Goalkeeper\n"));
    }

    #[test]
    fn test_inspect_json_shape() {
        let model = Orchestrator::new().resolve(DIAGRAM).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&ErdgenApp::inspect_json(&model).unwrap()).unwrap();

        assert_eq!(json["entities"][0]["name"], "Team");
        assert_eq!(json["entities"][0]["fields"][0]["type"], "List<Player>");
        assert_eq!(json["entities"][2]["parent"], "Player");
        assert_eq!(json["report"]["inheritance_links"], 1);
    }
}
