//! jsonplate cli interface

use clap::{Parser, Subcommand, ValueEnum};
use jsonplate::casing::Casing;
use jsonplate::syntax::{DollarBraces, DollarOnly, DollarOptionalBraces};
use jsonplate::Options;
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fill in a template
    ///
    /// Reads the template from stdin unless --template is given.
    /// Placeholders without a value are written as they are.
    Render(RenderCommand),

    /// List placeholders that have no value
    #[command(alias = "vars")]
    Variables(VariablesCommand),
}

#[derive(Parser, Debug)]
pub struct RenderCommand {
    #[clap(flatten)]
    pub template: TemplateArgs,

    /// Load variables from a json object file
    ///
    /// Can be specified multiple times. Later files override earlier ones.
    #[clap(short = 'V', long = "variables")]
    pub variable_files: Vec<PathBuf>,

    /// Set a single variable, the value is parsed as json and taken as a string if that fails
    ///
    /// Overrides values loaded with --variables.
    #[clap(short = 's', long = "set", value_parser = parse_assignment)]
    pub assignments: Vec<(String, String)>,

    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct VariablesCommand {
    #[clap(flatten)]
    pub template: TemplateArgs,
}

#[derive(Parser, Debug)]
pub struct TemplateArgs {
    /// Template file
    #[clap(short = 't', long = "template")]
    pub file: Option<PathBuf>,

    #[arg(long, default_value_t)]
    pub syntax: SyntaxArg,

    #[arg(long, default_value_t)]
    pub casing: CasingArg,
}

impl TemplateArgs {
    pub fn options(&self) -> Options {
        let options = Options::default().with_casing(self.casing.into());
        match self.syntax {
            SyntaxArg::Braces => options.with_syntax(DollarBraces),
            SyntaxArg::Dollar => options.with_syntax(DollarOnly),
            SyntaxArg::OptionalBraces => options.with_syntax(DollarOptionalBraces),
        }
    }
}

fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got {arg:?}"))
}

#[derive(ValueEnum, Clone, Copy, Default, Debug)]
pub enum SyntaxArg {
    /// ${name}
    #[default]
    Braces,
    /// $name
    Dollar,
    /// reads ${name} and $name, writes ${name}
    OptionalBraces,
}

impl std::fmt::Display for SyntaxArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxArg::Braces => f.write_str("braces"),
            SyntaxArg::Dollar => f.write_str("dollar"),
            SyntaxArg::OptionalBraces => f.write_str("optional-braces"),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Default, Debug)]
pub enum CasingArg {
    #[default]
    Preserve,
    Camel,
    Snake,
    Kebab,
}

impl From<CasingArg> for Casing {
    fn from(value: CasingArg) -> Self {
        match value {
            CasingArg::Preserve => Casing::Preserve,
            CasingArg::Camel => Casing::CamelCase,
            CasingArg::Snake => Casing::SnakeCase,
            CasingArg::Kebab => Casing::KebabCase,
        }
    }
}

impl std::fmt::Display for CasingArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CasingArg::Preserve => f.write_str("preserve"),
            CasingArg::Camel => f.write_str("camel"),
            CasingArg::Snake => f.write_str("snake"),
            CasingArg::Kebab => f.write_str("kebab"),
        }
    }
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}
