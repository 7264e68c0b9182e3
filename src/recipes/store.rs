//! File-backed recipe store
//!
//! Recipes live as `<slug>.md` files in one directory. Each file may start
//! with YAML front matter between `---` lines; the rest is the markdown
//! body.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::scaling::{extract_ingredients, parse_quantity, scale, IngredientEntry};

const RECIPE_EXTENSION: &str = "md";
const FRONT_MATTER_FENCE: &str = "---";

/// Recipe store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid front matter in '{slug}': {source}")]
    FrontMatter {
        slug: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error("Invalid recipe slug: {0:?}")]
    InvalidSlug(String),
}

/// Result type for recipe store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Servings may be written as `4`, `"4"` or `"2 1/2"`
fn lenient_servings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Number(n) => n.as_f64(),
        serde_yaml::Value::String(s) => parse_quantity(&s),
        _ => None,
    })
}

/// Recipe front matter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_servings")]
    pub servings: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub prep_time: Option<String>,
    #[serde(default)]
    pub cook_time: Option<String>,
    /// Any other front matter keys
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A recipe read from the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub slug: String,
    pub title: String,
    pub meta: RecipeMeta,
    pub body: String,
}

/// Recipe summary for listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSummary {
    pub slug: String,
    pub title: String,
    pub servings: Option<f64>,
    pub tags: Vec<String>,
}

impl Recipe {
    /// Parse a recipe file's text
    pub fn parse(slug: &str, text: &str) -> StoreResult<Self> {
        let (front_matter, body) = split_front_matter(text);

        let meta = match front_matter {
            Some(yaml) if !yaml.trim().is_empty() => {
                serde_yaml::from_str::<RecipeMeta>(yaml).map_err(|source| StoreError::FrontMatter {
                    slug: slug.to_string(),
                    source,
                })?
            }
            _ => RecipeMeta::default(),
        };

        let title = meta
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| first_title_heading(body))
            .unwrap_or_else(|| slug.to_string());

        Ok(Self {
            slug: slug.to_string(),
            title,
            meta,
            body: body.to_string(),
        })
    }

    /// Servings multiplied by `factor`, when the recipe states them
    pub fn scale_servings(&self, factor: f64) -> Option<f64> {
        self.meta.servings.map(|servings| servings * factor)
    }

    /// Copy with the body and servings scaled by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        let mut scaled = self.clone();
        scaled.body = scale(&self.body, factor);
        scaled.meta.servings = self.scale_servings(factor);
        scaled
    }

    /// Ingredient entries of the body, scaled by `factor`
    pub fn ingredients(&self, factor: f64) -> Vec<IngredientEntry> {
        extract_ingredients(&self.body, factor)
    }

    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            servings: self.meta.servings,
            tags: self.meta.tags.clone(),
        }
    }
}

/// Split `---` front matter from the body
///
/// Returns `(None, text)` when the text does not open with a fence or the
/// fence is never closed.
pub fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(first_line_end) = text.find('\n') else {
        return (None, text);
    };
    if text[..first_line_end].trim_end() != FRONT_MATTER_FENCE {
        return (None, text);
    }

    let yaml_start = first_line_end + 1;
    let mut offset = yaml_start;
    for line in text[yaml_start..].split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            return (Some(&text[yaml_start..offset]), &text[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, text)
}

fn first_title_heading(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Reject slugs that could escape the recipes directory
pub fn validate_slug(slug: &str) -> StoreResult<&str> {
    let trimmed = slug.trim();
    let invalid = trimmed.is_empty()
        || trimmed.starts_with('.')
        || trimmed.contains('/')
        || trimmed.contains('\\')
        || trimmed.contains("..")
        || trimmed.contains('\0');
    if invalid {
        return Err(StoreError::InvalidSlug(slug.to_string()));
    }
    Ok(trimmed)
}

/// Directory of markdown recipes
#[derive(Debug, Clone)]
pub struct RecipeStore {
    root: PathBuf,
}

impl RecipeStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{}.{}", slug, RECIPE_EXTENSION))
    }

    /// Slugs of all recipe files, sorted
    pub fn slugs(&self) -> StoreResult<Vec<String>> {
        let mut slugs = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(RECIPE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                slugs.push(stem.to_string());
            }
        }
        slugs.sort();
        Ok(slugs)
    }

    /// Read one recipe by slug
    pub fn get(&self, slug: &str) -> StoreResult<Recipe> {
        let slug = validate_slug(slug)?;
        let path = self.path_for(slug);
        if !path.is_file() {
            return Err(StoreError::NotFound(slug.to_string()));
        }
        let text = fs::read_to_string(&path)?;
        Recipe::parse(slug, &text)
    }

    /// Body of one recipe with ingredient quantities scaled
    pub fn scaled_body(&self, slug: &str, factor: f64) -> StoreResult<String> {
        let recipe = self.get(slug)?;
        Ok(scale(&recipe.body, factor))
    }

    /// Summaries of every readable recipe, sorted by title
    ///
    /// Files that fail to read or parse are skipped with a warning.
    pub fn list(&self) -> StoreResult<Vec<RecipeSummary>> {
        let mut summaries: Vec<RecipeSummary> = self
            .slugs()?
            .iter()
            .filter_map(|slug| match self.get(slug) {
                Ok(recipe) => Some(recipe.summary()),
                Err(e) => {
                    tracing::warn!("Skipping recipe '{}': {}", slug, e);
                    None
                }
            })
            .collect();
        summaries.sort_by_key(|s| s.title.to_lowercase());
        Ok(summaries)
    }

    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.slugs()?.len())
    }
}
