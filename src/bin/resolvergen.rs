//! generate typescript resolver types from a graphql schema
//!
//! reads the schema from a file or endpoint, introspects the configured model
//! files, and writes one resolver declaration module.
//!
//! command help reference (kept in sync with `resolvergen --help`):
#[doc = concat!("```text\n", include_str!("resolvergen-help.txt"), "\n```")]
pub const CLI_HELP: &str = include_str!("resolvergen-help.txt");

use resolvergen::{format, generate, GenerateArgs, GeneratorConfig, Prettier, Schema};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Clone)]
struct Args {
    config: Option<PathBuf>,
    schema_path: Option<PathBuf>,
    url: Option<String>,
    token: Option<String>,
    context: Option<String>,
    models: Vec<(String, String)>,
    out: Option<PathBuf>,
    no_format: bool,
}

impl Args {
    /// anchor path flags at `dir`, so they do not resolve against the config file
    fn relative_to(&self, dir: &Path) -> Args {
        let models = self
            .models
            .iter()
            .map(|(type_name, reference)| {
                let reference = match reference.rsplit_once(':') {
                    Some((file, model)) if !file.is_empty() => {
                        format!("{}:{model}", dir.join(file).display())
                    }
                    _ => reference.clone(),
                };
                (type_name.clone(), reference)
            })
            .collect();

        Args {
            schema_path: self.schema_path.as_ref().map(|path| dir.join(path)),
            out: self.out.as_ref().map(|path| dir.join(path)),
            models,
            ..self.clone()
        }
    }
}

#[derive(Debug)]
enum ParseArgsError {
    Help,
    Message(String),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args().collect()) {
        Ok(args) => args,
        Err(ParseArgsError::Help) => {
            print!("{CLI_HELP}");
            return;
        }
        Err(ParseArgsError::Message(err)) => {
            eprintln!("{err}\n\n{CLI_HELP}");
            std::process::exit(1);
        }
    };

    match run(&args) {
        Ok(output) => tracing::info!(output = %output.display(), "resolvers generated"),
        Err(err) => {
            eprintln!("codegen failed: {err}");
            std::process::exit(1);
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<Args, ParseArgsError> {
    let mut parsed = Args::default();

    let mut iter = args.into_iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value(&arg, iter.next())?)),
            "--schema" => parsed.schema_path = Some(PathBuf::from(value(&arg, iter.next())?)),
            "--url" => parsed.url = Some(value(&arg, iter.next())?),
            "--token" => parsed.token = Some(value(&arg, iter.next())?),
            "--context" => parsed.context = Some(value(&arg, iter.next())?),
            "--out" => parsed.out = Some(PathBuf::from(value(&arg, iter.next())?)),
            "--model" => {
                let mapping = value(&arg, iter.next())?;
                let (type_name, reference) = mapping.split_once('=').ok_or_else(|| {
                    ParseArgsError::Message(format!(
                        "--model expects <Type>=<file>:<Name>, got {mapping}"
                    ))
                })?;
                parsed
                    .models
                    .push((type_name.to_string(), reference.to_string()));
            }
            "--no-format" => parsed.no_format = true,
            "--help" | "-h" => return Err(ParseArgsError::Help),
            _ => return Err(ParseArgsError::Message(format!("unknown argument: {arg}"))),
        }
    }

    if parsed.config.is_none() {
        if parsed.out.is_none() {
            return Err(ParseArgsError::Message("--out is required without --config".to_string()));
        }
        if parsed.context.is_none() {
            return Err(ParseArgsError::Message(
                "--context is required without --config".to_string(),
            ));
        }
        if parsed.url.is_none() && parsed.schema_path.is_none() {
            return Err(ParseArgsError::Message(
                "--url or --schema is required without --config".to_string(),
            ));
        }
    }

    Ok(parsed)
}

fn value(flag: &str, value: Option<String>) -> Result<String, ParseArgsError> {
    value.ok_or_else(|| ParseArgsError::Message(format!("{flag} expects a value")))
}

fn build_config(args: &Args) -> resolvergen::Result<GeneratorConfig> {
    let (mut config, args) = match &args.config {
        Some(path) => {
            let cwd = std::env::current_dir().map_err(|err| resolvergen::Error::Io {
                path: PathBuf::from("."),
                source: err,
            })?;
            (GeneratorConfig::from_path(path)?, args.relative_to(&cwd))
        }
        None => (
            GeneratorConfig::new(
                args.out.clone().unwrap_or_default(),
                args.context.clone().unwrap_or_default(),
            ),
            args.clone(),
        ),
    };

    if let Some(schema) = &args.schema_path {
        config.schema = Some(schema.clone());
        config.schema_url = None;
    }
    if let Some(url) = &args.url {
        config.schema_url = Some(url.clone());
        config.schema = None;
    }
    if let Some(token) = &args.token {
        config.token = Some(token.clone());
    }
    if let Some(context) = &args.context {
        config.context = context.clone();
    }
    if let Some(out) = &args.out {
        config.output = out.clone();
    }
    for (type_name, reference) in &args.models {
        config.models.insert(type_name.clone(), reference.clone());
    }
    if args.no_format {
        config.format = false;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> resolvergen::Result<PathBuf> {
    let config = build_config(args)?;

    let schema = Schema::from_sdl(&config.schema_source()?)?;
    let models = config.model_map()?;
    tracing::info!(
        types = schema.types.len(),
        models = models.len(),
        "schema loaded"
    );

    let code = generate(&GenerateArgs {
        types: &schema.types,
        model_map: &models,
        context_path: &config.context,
    })?;
    let code = if config.format {
        format(&code, &Prettier::new())
    } else {
        code
    };

    let output = config.output_path();
    if let Some(parent) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| resolvergen::Error::Io {
            path: parent.to_path_buf(),
            source: err,
        })?;
    }
    fs::write(&output, code).map_err(|err| resolvergen::Error::Io {
        path: output.clone(),
        source: err,
    })?;

    Ok(output)
}
