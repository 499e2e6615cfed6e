//! generator configuration
//!
//! build a [`GeneratorConfig`] in code or load it from a json file, then turn
//! it into a [`ModelMap`] and schema source for [`crate::generate`].
//!
//! ```json
//! {
//!   "schema": "./schema.graphql",
//!   "context": "./context",
//!   "output": "./generated/resolvers.ts",
//!   "models": { "User": "./models/user.ts:UserModel" }
//! }
//! ```

use crate::error::{Error, Result};
use crate::model::{Model, ModelMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use url::Url;

fn default_format() -> bool {
    true
}

/// configuration for a generation run
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// sdl file on disk
    #[serde(default)]
    pub schema: Option<PathBuf>,

    /// remote sdl endpoint, used when `schema` is not set
    #[serde(default)]
    pub schema_url: Option<String>,

    /// bearer token sent to `schema_url`
    #[serde(default)]
    pub token: Option<String>,

    /// module specifier the `Context` type is imported from
    pub context: String,

    /// generated file path
    pub output: PathBuf,

    /// graphql type name to `<model file>:<type name>`
    #[serde(default)]
    pub models: BTreeMap<String, String>,

    /// run the generated code through prettier
    #[serde(default = "default_format")]
    pub format: bool,

    /// directory relative paths are resolved against
    #[serde(skip)]
    pub(crate) base_dir: PathBuf,
}

impl GeneratorConfig {
    /// create a configuration writing to `output`
    ///
    /// # example
    ///
    /// ```
    /// use resolvergen::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::new("src/generated/resolvers.ts", "../context")
    ///     .with_schema("schema.graphql")
    ///     .with_model("User", "src/models.ts:UserModel");
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(output: impl Into<PathBuf>, context: impl Into<String>) -> Self {
        Self {
            schema: None,
            schema_url: None,
            token: None,
            context: context.into(),
            output: output.into(),
            models: BTreeMap::new(),
            format: true,
            base_dir: PathBuf::new(),
        }
    }

    /// load a json configuration; relative paths resolve against its directory
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        let mut config: GeneratorConfig = serde_json::from_str(&text)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    /// read the schema from an sdl file
    pub fn with_schema(mut self, schema: impl Into<PathBuf>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// fetch the schema from a remote sdl endpoint
    pub fn with_schema_url(mut self, url: impl Into<String>) -> Self {
        self.schema_url = Some(url.into());
        self
    }

    /// bearer token for the schema endpoint
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// register a model as `<file>:<TypeName>`
    pub fn with_model(
        mut self,
        type_name: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        self.models.insert(type_name.into(), reference.into());
        self
    }

    /// enable or disable prettier formatting
    ///
    /// default: enabled
    pub fn with_format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }

    /// resolve relative paths against `dir`
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// validate the configuration
    pub fn validate(&self) -> Result<()> {
        match (&self.schema, &self.schema_url) {
            (Some(_), Some(_)) => {
                return Err(Error::Config(
                    "schema and schema_url are mutually exclusive".to_string(),
                ))
            }
            (None, None) => {
                return Err(Error::Config("schema or schema_url is required".to_string()))
            }
            (None, Some(url)) => {
                self.parsed_schema_url(url)?;
            }
            (Some(_), None) => {}
        }

        if self.output.as_os_str().is_empty() {
            return Err(Error::Config("output cannot be empty".to_string()));
        }

        if self.context.is_empty() {
            return Err(Error::Config("context cannot be empty".to_string()));
        }

        let mut sources: BTreeMap<&str, PathBuf> = BTreeMap::new();
        for (type_name, reference) in &self.models {
            let (file, model) = split_model_reference(type_name, reference)?;
            let file = normalize(&self.resolve(Path::new(file)));
            match sources.get(model) {
                Some(seen) if *seen != file => {
                    return Err(Error::Config(format!(
                        "model {model} is imported from both {} and {}",
                        seen.display(),
                        file.display()
                    )))
                }
                Some(_) => {}
                None => {
                    sources.insert(model, file);
                }
            }
        }

        Ok(())
    }

    /// generated file path, resolved against the base directory
    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    /// build the model map, with import paths relative to the output file
    pub fn model_map(&self) -> Result<ModelMap> {
        let output = self.output_path();
        let output_dir = output.parent().unwrap_or_else(|| Path::new(""));

        let mut models = ModelMap::new();
        for (type_name, reference) in &self.models {
            let (file, model_type_name) = split_model_reference(type_name, reference)?;
            let absolute_file_path = self.resolve(Path::new(file));
            let import = import_path(output_dir, &absolute_file_path);
            models.insert(
                type_name.clone(),
                Model::new(model_type_name, absolute_file_path, import),
            );
        }
        Ok(models)
    }

    /// read the sdl from disk or fetch it from `schema_url`
    pub fn schema_source(&self) -> Result<String> {
        if let Some(schema) = &self.schema {
            let path = self.resolve(schema);
            return fs::read_to_string(&path).map_err(|err| Error::io(path, err));
        }

        let url = self
            .schema_url
            .as_deref()
            .ok_or_else(|| Error::Config("schema or schema_url is required".to_string()))?;
        let url = self.parsed_schema_url(url)?;

        tracing::debug!(url = %url, "fetching schema");
        let client = reqwest::blocking::Client::new();
        let mut request = client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::Fetch {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    fn parsed_schema_url(&self, url: &str) -> Result<Url> {
        let parsed = Url::parse(url)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::Config(format!(
                "invalid url scheme: {}. must be http or https",
                parsed.scheme()
            )));
        }
        Ok(parsed)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("schema", &self.schema)
            .field("schema_url", &self.schema_url)
            .field("context", &self.context)
            .field("output", &self.output)
            .field("models", &self.models)
            .field("format", &self.format)
            .field("base_dir", &self.base_dir)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// split `<file>:<TypeName>` on its last colon
fn split_model_reference<'a>(type_name: &str, reference: &'a str) -> Result<(&'a str, &'a str)> {
    match reference.rsplit_once(':') {
        Some((file, model)) if !file.is_empty() && !model.is_empty() => Ok((file, model)),
        _ => Err(Error::Config(format!(
            "model for {type_name} must look like <file>:<TypeName>, got {reference}"
        ))),
    }
}

/// module specifier for `model_file` as seen from `from_dir`
fn import_path(from_dir: &Path, model_file: &Path) -> String {
    let relative = relative_path(&normalize(from_dir), &normalize(model_file));
    let mut specifier = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    for ext in [".d.ts", ".tsx", ".ts"] {
        if let Some(stripped) = specifier.strip_suffix(ext) {
            specifier = stripped.to_string();
            break;
        }
    }

    if specifier.starts_with("../") {
        specifier
    } else {
        format!("./{specifier}")
    }
}

/// lexically resolve `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from_dir.components().collect();
    let target: Vec<Component<'_>> = to.components().collect();
    let common = from
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push("..");
    }
    for component in &target[common..] {
        out.push(component.as_os_str());
    }
    out
}
