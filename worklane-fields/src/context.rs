//! FieldsContext — main API surface for the fields registry.
//!
//! Manages field definitions as YAML files under a `definitions/` directory
//! and keeps an in-memory index for lookup by name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::types::FieldDef;

/// A collection of default field definitions.
///
/// Consumers build this to pass to `FieldsContextBuilder::with_defaults()`.
/// On open, defaults that don't already exist on disk are written.
#[derive(Default)]
pub struct FieldDefaults {
    fields: Vec<FieldDef>,
}

impl FieldDefaults {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a default field definition.
    pub fn field(mut self, def: FieldDef) -> Self {
        self.fields.push(def);
        self
    }

    /// Access the field definitions.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }
}

/// Builder for `FieldsContext`. Created by `FieldsContext::open()`.
pub struct FieldsContextBuilder {
    root: PathBuf,
    defaults: Option<FieldDefaults>,
}

impl FieldsContextBuilder {
    /// Provide default field definitions.
    /// Defaults are seeded on first open; existing definitions are preserved.
    pub fn with_defaults(mut self, defaults: FieldDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Build the context: create directories, seed defaults, load from disk.
    pub async fn build(self) -> Result<FieldsContext> {
        let root = self.root;

        let defs_dir = root.join("definitions");
        fs::create_dir_all(&defs_dir).await?;

        if let Some(defaults) = self.defaults {
            seed_defaults(&root, &defaults).await?;
        }

        let mut ctx = FieldsContext {
            root,
            fields: Vec::new(),
            name_index: HashMap::new(),
        };

        ctx.load_definitions().await?;

        debug!(fields = ctx.fields.len(), "fields context opened");

        Ok(ctx)
    }
}

/// Seed default definitions that don't already exist on disk.
///
/// Definitions are matched by name — a customized `status.yaml` is never
/// overwritten by the built-in default.
async fn seed_defaults(root: &Path, defaults: &FieldDefaults) -> Result<()> {
    for def in defaults.fields() {
        let path = definition_path(root, &def.name);
        if !path.exists() {
            write_definition(&path, def).await?;
            debug!(field = %def.name, "seeded default field definition");
        }
    }
    Ok(())
}

fn definition_path(root: &Path, name: &str) -> PathBuf {
    root.join("definitions").join(format!("{}.yaml", name))
}

async fn write_definition(path: &Path, def: &FieldDef) -> Result<()> {
    let content = serde_yaml_ng::to_string(def)?;
    fs::write(path, content).await?;
    Ok(())
}

/// The fields registry: definitions loaded from disk with a name index.
pub struct FieldsContext {
    root: PathBuf,
    fields: Vec<FieldDef>,
    name_index: HashMap<String, usize>,
}

impl FieldsContext {
    /// Open a registry rooted at the given directory.
    pub fn open(root: impl Into<PathBuf>) -> FieldsContextBuilder {
        FieldsContextBuilder {
            root: root.into(),
            defaults: None,
        }
    }

    /// The registry root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All loaded field definitions.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Look up a definition by field name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.name_index.get(name).map(|&i| &self.fields[i])
    }

    /// Look up a definition by field name, erroring when absent.
    pub fn require_field(&self, name: &str) -> Result<&FieldDef> {
        self.field(name).ok_or_else(|| FieldsError::FieldNotFound {
            name: name.to_string(),
        })
    }

    /// Add or replace a definition, persisting it to disk.
    ///
    /// Adding a new definition whose name collides with a different
    /// definition's file is rejected.
    pub async fn upsert(&mut self, def: FieldDef) -> Result<()> {
        if let Some(&i) = self.name_index.get(&def.name) {
            if self.fields[i].id != def.id {
                return Err(FieldsError::DuplicateFieldName {
                    name: def.name.clone(),
                });
            }
        }

        write_definition(&definition_path(&self.root, &def.name), &def).await?;

        match self.name_index.get(&def.name) {
            Some(&i) => self.fields[i] = def,
            None => {
                self.name_index.insert(def.name.clone(), self.fields.len());
                self.fields.push(def);
            }
        }
        Ok(())
    }

    /// Load every `.yaml` definition from the definitions directory.
    async fn load_definitions(&mut self) -> Result<()> {
        let defs_dir = self.root.join("definitions");
        if !defs_dir.exists() {
            return Err(FieldsError::NotInitialized { path: defs_dir });
        }

        self.fields.clear();
        self.name_index.clear();

        let mut entries = fs::read_dir(&defs_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("yaml") {
                continue;
            }
            let content = fs::read_to_string(&path).await?;
            let def: FieldDef = serde_yaml_ng::from_str(&content)?;
            if self.name_index.contains_key(&def.name) {
                return Err(FieldsError::DuplicateFieldName { name: def.name });
            }
            self.name_index.insert(def.name.clone(), self.fields.len());
            self.fields.push(def);
        }

        // Stable ordering independent of directory iteration order
        self.fields.sort_by(|a, b| a.name.cmp(&b.name));
        self.name_index = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.clone(), i))
            .collect();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldKind, SelectOption};
    use tempfile::TempDir;

    fn defaults() -> FieldDefaults {
        FieldDefaults::new()
            .field(FieldDef::new("title", FieldKind::PlainText).required())
            .field(FieldDef::new(
                "status",
                FieldKind::SingleSelect {
                    options: vec![SelectOption::new("todo", 0), SelectOption::new("done", 1)],
                },
            ))
    }

    #[tokio::test]
    async fn open_seeds_defaults() {
        let temp = TempDir::new().unwrap();
        let ctx = FieldsContext::open(temp.path().join("fields"))
            .with_defaults(defaults())
            .build()
            .await
            .unwrap();

        assert_eq!(ctx.fields().len(), 2);
        assert!(ctx.field("title").is_some());
        assert!(ctx.field("status").is_some());
        assert!(ctx.field("missing").is_none());
    }

    #[tokio::test]
    async fn reopen_preserves_customizations() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("fields");

        let mut ctx = FieldsContext::open(&root)
            .with_defaults(defaults())
            .build()
            .await
            .unwrap();

        // Customize the title field
        let mut title = ctx.field("title").unwrap().clone();
        title.description = Some("Card headline".into());
        ctx.upsert(title).await.unwrap();

        // Reopen with the same defaults — customization survives
        let ctx = FieldsContext::open(&root)
            .with_defaults(defaults())
            .build()
            .await
            .unwrap();
        assert_eq!(
            ctx.field("title").unwrap().description.as_deref(),
            Some("Card headline")
        );
    }

    #[tokio::test]
    async fn upsert_adds_new_definition() {
        let temp = TempDir::new().unwrap();
        let mut ctx = FieldsContext::open(temp.path().join("fields"))
            .build()
            .await
            .unwrap();

        ctx.upsert(FieldDef::new("due", FieldKind::Date))
            .await
            .unwrap();
        assert!(ctx.field("due").is_some());
        assert!(definition_path(ctx.root(), "due").exists());
    }

    #[tokio::test]
    async fn upsert_rejects_name_collision() {
        let temp = TempDir::new().unwrap();
        let mut ctx = FieldsContext::open(temp.path().join("fields"))
            .with_defaults(defaults())
            .build()
            .await
            .unwrap();

        let other = FieldDef::new("title", FieldKind::MultiLineText);
        let result = ctx.upsert(other).await;
        assert!(matches!(
            result,
            Err(FieldsError::DuplicateFieldName { .. })
        ));
    }

    #[tokio::test]
    async fn require_field_errors_when_absent() {
        let temp = TempDir::new().unwrap();
        let ctx = FieldsContext::open(temp.path().join("fields"))
            .build()
            .await
            .unwrap();
        assert!(matches!(
            ctx.require_field("nope"),
            Err(FieldsError::FieldNotFound { .. })
        ));
    }
}
