use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::registry::{Import, ModuleVersion};
use crate::ui_bridge::error::UiBridgeError;

/// Parsed UI description: imported modules and a single root object.
///
/// ```json
/// {
///   "imports": [{ "module": "Controls", "version": "1.0" }],
///   "root": {
///     "type": "ApplicationWindow",
///     "id": "window",
///     "properties": { "title": "dvrescue" },
///     "singletons": ["FileUtils"],
///     "children": []
///   }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct UiDescription {
    #[serde(default)]
    pub imports: Vec<ImportDecl>,
    pub root: ObjectDecl,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportDecl {
    pub module: String,
    pub version: String,
}

/// One object declaration and its children.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectDecl {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    /// Singletons this object refers to
    #[serde(default)]
    pub singletons: Vec<String>,
    #[serde(default)]
    pub children: Vec<ObjectDecl>,
}

impl UiDescription {
    /// Parses a JSON description; `url` only labels errors.
    pub fn parse(text: &str, url: &Url) -> Result<Self, UiBridgeError> {
        serde_json::from_str(text).map_err(|source| UiBridgeError::InvalidDescription {
            url: url.to_string(),
            source,
        })
    }

    /// Imports with their versions parsed.
    pub fn imports(&self) -> Result<Vec<Import>, UiBridgeError> {
        self.imports
            .iter()
            .map(|decl| {
                let version: ModuleVersion = decl.version.parse()?;
                Ok(Import::new(decl.module.clone(), version))
            })
            .collect()
    }

    /// Rejects descriptions declaring the same object id twice.
    pub fn check_ids(&self) -> Result<(), UiBridgeError> {
        fn walk<'a>(decl: &'a ObjectDecl, seen: &mut HashSet<&'a str>) -> Result<(), UiBridgeError> {
            if let Some(id) = decl.id.as_deref() {
                if !seen.insert(id) {
                    return Err(UiBridgeError::DuplicateObjectId { id: id.to_string() });
                }
            }
            decl.children.iter().try_for_each(|child| walk(child, seen))
        }
        walk(&self.root, &mut HashSet::new())
    }
}

/// Descriptions compiled into the binary, addressed by `qrc:` URLs.
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    resources: HashMap<String, &'static str>,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource under `path` (e.g. `/main.ui.json`).
    pub fn insert(&mut self, path: &str, contents: &'static str) {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        self.resources.insert(path, contents);
    }

    pub fn get(&self, path: &str) -> Option<&'static str> {
        self.resources.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Reads the text behind `url`: `qrc:` from this bundle, `file:` from disk.
    pub fn read(&self, url: &Url) -> Result<String, UiBridgeError> {
        match url.scheme() {
            "qrc" => self
                .get(url.path())
                .map(str::to_string)
                .ok_or_else(|| UiBridgeError::ResourceNotFound {
                    url: url.to_string(),
                }),
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| UiBridgeError::ResourceNotFound {
                        url: url.to_string(),
                    })?;
                fs::read_to_string(&path).map_err(|source| UiBridgeError::Io { path, source })
            }
            _ => Err(UiBridgeError::UnsupportedScheme {
                url: url.to_string(),
            }),
        }
    }
}
