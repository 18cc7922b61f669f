//! Category tree loaded once from the YAML category file
//!
//! Two levels only: top-level categories, each either a leaf or a parent
//! holding leaf subcategories.

use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::utils::{format_short, parse_duration};

/// A subcategory; always a leaf.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Subcategory {
    pub(crate) name: String,
    pub(crate) remind_every: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CategoryKind {
    Leaf {
        remind_every: Option<Duration>,
    },
    /// Interval used only when tracking is started at the parent level
    Parent {
        subcategories: Vec<Subcategory>,
        remind_every: Option<Duration>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Category {
    pub(crate) name: String,
    pub(crate) kind: CategoryKind,
}

impl Category {
    pub(crate) fn remind_every(&self) -> Option<Duration> {
        match &self.kind {
            CategoryKind::Leaf { remind_every } | CategoryKind::Parent { remind_every, .. } => {
                *remind_every
            }
        }
    }

    pub(crate) fn subcategories(&self) -> &[Subcategory] {
        match &self.kind {
            CategoryKind::Leaf { .. } => &[],
            CategoryKind::Parent { subcategories, .. } => subcategories,
        }
    }

    pub(crate) fn subcategory(&self, name: &str) -> Option<&Subcategory> {
        self.subcategories().iter().find(|s| s.name == name)
    }
}

/// Address of a trackable activity: a category and an optional subcategory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryPath {
    pub(crate) category: String,
    pub(crate) subcategory: Option<String>,
}

impl CategoryPath {
    pub(crate) fn new(category: impl Into<String>, subcategory: Option<String>) -> Self {
        CategoryPath {
            category: category.into(),
            subcategory,
        }
    }

    /// Tags handed to the tracker when this activity starts
    pub(crate) fn tags(&self) -> Vec<String> {
        let mut tags = vec![self.category.clone()];
        tags.extend(self.subcategory.iter().cloned());
        tags
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subcategory {
            Some(sub) => write!(f, "{}/{}", self.category, sub),
            None => f.write_str(&self.category),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CategoryTree {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Text(String),
    Seconds(u64),
}

#[derive(Deserialize)]
struct RawCategory {
    name: String,
    #[serde(default)]
    time: Option<RawDuration>,
    #[serde(default)]
    subcat: Vec<RawCategory>,
}

/// Longest reminder interval accepted from the category file.
const MAX_REMINDER: Duration = Duration::from_secs(366 * 24 * 3600);

fn to_reminder(name: &str, raw: Option<RawDuration>) -> Result<Option<Duration>, ConfigError> {
    let invalid = |input: String| ConfigError::InvalidDuration {
        name: name.to_string(),
        input,
    };
    let duration = match raw {
        None => return Ok(None),
        Some(RawDuration::Seconds(secs)) => Duration::from_secs(secs),
        Some(RawDuration::Text(text)) => {
            parse_duration(&text).ok_or_else(|| invalid(text.clone()))?
        }
    };
    if duration > MAX_REMINDER {
        return Err(invalid(format_short(duration)));
    }
    Ok((!duration.is_zero()).then_some(duration))
}

fn check_name<'a>(name: &'a str, seen: &mut HashSet<&'a str>) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::EmptyName);
    }
    if !seen.insert(name) {
        return Err(ConfigError::DuplicateName {
            name: name.to_string(),
        });
    }
    Ok(())
}

impl CategoryTree {
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content, path)
    }

    pub(crate) fn from_yaml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: Vec<RawCategory> =
            serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut seen = HashSet::new();
        for cat in &raw {
            check_name(&cat.name, &mut seen)?;
            let mut seen_sub = HashSet::new();
            for sub in &cat.subcat {
                check_name(&sub.name, &mut seen_sub)?;
                if !sub.subcat.is_empty() {
                    return Err(ConfigError::TooDeep {
                        name: sub.name.clone(),
                    });
                }
            }
        }

        let mut categories = Vec::with_capacity(raw.len());
        for cat in raw {
            let remind_every = to_reminder(&cat.name, cat.time)?;
            let kind = if cat.subcat.is_empty() {
                CategoryKind::Leaf { remind_every }
            } else {
                let subcategories = cat
                    .subcat
                    .into_iter()
                    .map(|sub| {
                        Ok(Subcategory {
                            remind_every: to_reminder(&sub.name, sub.time)?,
                            name: sub.name,
                        })
                    })
                    .collect::<Result<Vec<_>, ConfigError>>()?;
                CategoryKind::Parent {
                    subcategories,
                    remind_every,
                }
            };
            categories.push(Category {
                name: cat.name,
                kind,
            });
        }

        Ok(CategoryTree { categories })
    }

    pub(crate) fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub(crate) fn find(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Reminder interval for a path; zero when nothing matches or no
    /// reminder is configured.
    pub(crate) fn lookup_interval(&self, category: &str, subcategory: Option<&str>) -> Duration {
        let Some(cat) = self.find(category) else {
            return Duration::ZERO;
        };
        let remind_every = match subcategory {
            None => cat.remind_every(),
            Some(sub) => cat.subcategory(sub).and_then(|s| s.remind_every),
        };
        remind_every.unwrap_or(Duration::ZERO)
    }

    pub(crate) fn interval_for(&self, path: &CategoryPath) -> Duration {
        self.lookup_interval(&path.category, path.subcategory.as_deref())
    }
}

#[cfg(test)]
pub(crate) fn sample_tree() -> CategoryTree {
    CategoryTree::from_yaml(
        r#"
- name: Deep Work
  time: 25m
- name: Reading
  time: 1h
  subcat:
    - name: papers
      time: 45m
    - name: fiction
- name: Chores
"#,
        Path::new("sample.yml"),
    )
    .expect("sample tree")
}
