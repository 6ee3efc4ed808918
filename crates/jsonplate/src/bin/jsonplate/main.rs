mod cli;

use jsonplate::document::{Document, Variables};
use jsonplate::shape::Shape;
use jsonplate::value::Value;
use jsonplate::Options;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("JSONPLATE_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let command_result = match cli.command {
        cli::Command::Render(render_cli) => render(render_cli),
        cli::Command::Variables(variables_cli) => variables(variables_cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn render(cli: cli::RenderCommand) -> anyhow::Result<()> {
    let options = cli.template.options();
    let mut document = load(&cli.template, &options)?;

    let mut variables = Variables::new();
    for path in &cli.variable_files {
        tracing::info!(path = %path.display(), "loading variables");
        let file = std::fs::File::open(path)?;
        let Value::Object(object) =
            serde_json::from_reader::<_, Value>(std::io::BufReader::new(file))?
        else {
            anyhow::bail!("{} does not contain a json object", path.display());
        };
        variables.extend(object);
    }

    for (name, text) in &cli.assignments {
        let value = serde_json::from_str(text).unwrap_or_else(|_| Value::from(text.as_str()));
        variables.insert(name.clone(), value);
    }

    if let Some(root) = document.root() {
        document.set_variables(root, variables);
    }

    let rendered = document.render_root(&options);
    match cli.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), &rendered)?,
        cli::OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), &rendered)?;
            println!();
        }
    };

    Ok(())
}

pub fn variables(cli: cli::VariablesCommand) -> anyhow::Result<()> {
    let options = cli.template.options();
    let document = load(&cli.template, &options)?;

    if let Some(root) = document.root() {
        for name in document.unresolved(root, &options) {
            println!("{name}");
        }
    }

    Ok(())
}

fn load(template: &cli::TemplateArgs, options: &Options) -> anyhow::Result<Document> {
    let Some(path) = &template.file else {
        let stdin = std::io::read_to_string(std::io::stdin())?;
        return Ok(Document::from_json_str(&stdin, Shape::Any, options)?);
    };

    tracing::info!(path = %path.display(), "loading template");
    let file = std::fs::File::open(path)?;
    Ok(Document::from_json_reader(
        std::io::BufReader::new(file),
        Shape::Any,
        options,
    )?)
}
