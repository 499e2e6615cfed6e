//! model map
//!
//! maps graphql type names to the typescript model types backing them.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// placeholder type used when a graphql type has no model
pub const EMPTY_SHAPE: &str = "{}";

/// typescript model backing a graphql type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// declared type name inside the model file
    pub model_type_name: String,
    /// model source file, read during default resolver synthesis
    pub absolute_file_path: PathBuf,
    /// module specifier used in the generated import
    pub import_path_relative_to_output: String,
}

impl Model {
    pub fn new(
        model_type_name: impl Into<String>,
        absolute_file_path: impl Into<PathBuf>,
        import_path_relative_to_output: impl Into<String>,
    ) -> Self {
        Self {
            model_type_name: model_type_name.into(),
            absolute_file_path: absolute_file_path.into(),
            import_path_relative_to_output: import_path_relative_to_output.into(),
        }
    }
}

/// graphql type name to model
pub type ModelMap = BTreeMap<String, Model>;

/// model type name for a graphql type, or the empty shape
///
/// root operation types usually have no model; that is not an error.
pub fn resolve_model_name<'a>(type_name: &str, model_map: &'a ModelMap) -> &'a str {
    model_map
        .get(type_name)
        .map(|model| model.model_type_name.as_str())
        .unwrap_or(EMPTY_SHAPE)
}
