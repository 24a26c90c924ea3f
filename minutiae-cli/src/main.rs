use clap::{Parser, Subcommand};
use minutiae::image::io::load_image_dims;
use minutiae::io::{read_template, save_template, write_text_export};
use minutiae::template::to_text;
use minutiae::{
    DecodeWarning, DecodedTemplate, EncodeConfig, ImageDims, Minutia, MinutiaKind, Quality,
    Registry,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Finger minutiae record tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// Print the JSON schema of the build config and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example build config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a template and print it as JSON.
    Inspect {
        template: PathBuf,
        /// Write the JSON to a file instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Decode a template and print one `kind,x,y,angle,quality` line per minutia.
    ExportText {
        template: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Build a template from a JSON config.
    Build {
        #[arg(short, long, value_name = "FILE", default_value = "config.json")]
        config: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QualityJson {
    Raw(u32),
    Token(String),
}

impl Default for QualityJson {
    fn default() -> Self {
        QualityJson::Raw(0)
    }
}

impl TryFrom<QualityJson> for Quality {
    type Error = minutiae::MinutiaeError;

    fn try_from(value: QualityJson) -> Result<Self, Self::Error> {
        match value {
            QualityJson::Token(token) => token.parse(),
            QualityJson::Raw(0) => Ok(Quality::default()),
            QualityJson::Raw(value) => u8::try_from(value)
                .map_err(|_| minutiae::MinutiaeError::QualityOutOfRange { value })
                .and_then(Quality::from_raw),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MinutiaJson {
    #[serde(default = "default_kind")]
    kind: String,
    x: u16,
    y: u16,
    #[serde(default)]
    angle: u32,
    #[serde(default)]
    quality: QualityJson,
}

fn default_kind() -> String {
    MinutiaKind::RidgeEnding.to_string()
}

impl MinutiaJson {
    fn into_minutia(self) -> Result<Minutia, minutiae::MinutiaeError> {
        let kind: MinutiaKind = self.kind.parse()?;
        let angle = (self.angle % 360) as u16;
        Ok(Minutia::new(kind, self.x, self.y, angle, self.quality.try_into()?))
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct EncodeConfigJson {
    x_resolution: u16,
    y_resolution: u16,
    view_count: u8,
    finger_quality: u8,
}

impl Default for EncodeConfigJson {
    fn default() -> Self {
        let cfg = EncodeConfig::default();
        Self {
            x_resolution: cfg.x_resolution,
            y_resolution: cfg.y_resolution,
            view_count: cfg.view_count,
            finger_quality: cfg.finger_quality,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: Option<String>,
    image_width: u32,
    image_height: u32,
    output_path: String,
    text_output_path: Option<String>,
    encode: EncodeConfigJson,
    minutiae: Vec<MinutiaJson>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: None,
            image_width: 0,
            image_height: 0,
            output_path: String::new(),
            text_output_path: None,
            encode: EncodeConfigJson::default(),
            minutiae: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HeaderRecord {
    format: String,
    version: String,
    record_length: u32,
    width: u16,
    height: u16,
    x_resolution: u16,
    y_resolution: u16,
    view_count: u8,
    finger_quality: u8,
    minutiae_count: u8,
}

#[derive(Debug, Serialize)]
struct MinutiaRecord {
    kind: String,
    x: u16,
    y: u16,
    angle: u16,
    quality: String,
}

impl From<&Minutia> for MinutiaRecord {
    fn from(value: &Minutia) -> Self {
        Self {
            kind: value.kind.to_string(),
            x: value.x,
            y: value.y,
            angle: value.angle,
            quality: value.quality.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    header: HeaderRecord,
    minutiae: Vec<MinutiaRecord>,
    warnings: Vec<String>,
}

fn tag_text(tag: &[u8; 4]) -> String {
    String::from_utf8_lossy(tag)
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

fn warning_text(warning: &DecodeWarning) -> String {
    match warning {
        DecodeWarning::ReservedKindCode { record } => {
            format!("record {record}: reserved kind code read as bifurcation")
        }
        DecodeWarning::LengthMismatch { declared, expected } => {
            format!("declared length {declared} bytes, layout implies {expected}")
        }
        DecodeWarning::QualityOutOfRange { record, value } => {
            format!("record {record}: quality {value} read as 100")
        }
    }
}

impl From<&DecodedTemplate> for Output {
    fn from(value: &DecodedTemplate) -> Self {
        let h = &value.header;
        Self {
            header: HeaderRecord {
                format: tag_text(&h.format),
                version: tag_text(&h.version),
                record_length: h.record_length,
                width: h.width,
                height: h.height,
                x_resolution: h.x_resolution,
                y_resolution: h.y_resolution,
                view_count: h.view_count,
                finger_quality: h.finger_quality,
                minutiae_count: h.minutiae_count,
            },
            minutiae: value.minutiae.iter().map(MinutiaRecord::from).collect(),
            warnings: value.warnings.iter().map(warning_text).collect(),
        }
    }
}

fn emit(text: &str, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}

fn build(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config_text = fs::read_to_string(&config_path)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.output_path.is_empty() {
        return Err("output_path must be set in the config".into());
    }

    let dims = match &config.image_path {
        Some(path) => load_image_dims(path)?,
        None => ImageDims::new(config.image_width, config.image_height)?,
    };

    let mut registry = Registry::with_image(dims);
    for (idx, entry) in config.minutiae.into_iter().enumerate() {
        let minutia = entry.into_minutia()?;
        registry
            .add(minutia)
            .map_err(|err| format!("minutia {idx}: {err}"))?;
    }

    let cfg = EncodeConfig {
        x_resolution: config.encode.x_resolution,
        y_resolution: config.encode.y_resolution,
        view_count: config.encode.view_count,
        finger_quality: config.encode.finger_quality,
    };
    let written = save_template(&config.output_path, registry.minutiae(), dims, &cfg)?;
    tracing::info!(path = %config.output_path, bytes = written, "template written");

    if let Some(path) = &config.text_output_path {
        write_text_export(path, registry.minutiae())?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("minutiae=info".parse()?)
                    .add_directive("minutiae_cli=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    match cli.command {
        Some(Command::Inspect { template, output }) => {
            let decoded = read_template(&template)?;
            let json = serde_json::to_string_pretty(&Output::from(&decoded))?;
            emit(&format!("{json}\n"), output)
        }
        Some(Command::ExportText { template, output }) => {
            let decoded = read_template(&template)?;
            emit(&to_text(&decoded.minutiae), output)
        }
        Some(Command::Build { config }) => build(config),
        None => Err("no command given; see --help".into()),
    }
}
