//! Runtime capability requirements (PHP extensions, Apache modules).

use std::collections::BTreeMap;

/// Declared requirements: category name -> ordered requirement names.
pub type RequirementSpec = BTreeMap<String, Vec<String>>;

/// Requirement categories the checker knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementCategory {
    Php,
    Apache,
}

impl RequirementCategory {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "php" => Some(Self::Php),
            "apache" => Some(Self::Apache),
            _ => None,
        }
    }
}

/// Capabilities reported by the host, per category.
///
/// `None` means the category cannot be inspected in this environment.
#[derive(Debug, Clone, Default)]
pub struct InstalledCapabilities {
    pub php_extensions: Option<Vec<String>>,
    pub apache_modules: Option<Vec<String>>,
}

impl InstalledCapabilities {
    fn for_category(&self, category: RequirementCategory) -> Option<&[String]> {
        match category {
            RequirementCategory::Php => self.php_extensions.as_deref(),
            RequirementCategory::Apache => self.apache_modules.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementStatus {
    pub name: String,
    pub satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryResult {
    pub category: String,
    pub entries: Vec<RequirementStatus>,
}

/// Result of evaluating a `RequirementSpec` against the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementResult {
    pub categories: Vec<CategoryResult>,
    pub errors: bool,
}

impl RequirementResult {
    /// Evaluate every requirement of known, inspectable categories.
    ///
    /// Unknown categories and categories the host cannot inspect are skipped.
    /// Names compare case-insensitively ("cURL" matches "curl").
    pub fn evaluate(spec: &RequirementSpec, installed: &InstalledCapabilities) -> Self {
        let mut result = Self::default();

        for (category_name, names) in spec {
            let Some(category) = RequirementCategory::from_name(category_name) else {
                tracing::debug!(category = %category_name, "skipping unknown requirement category");
                continue;
            };
            let Some(available) = installed.for_category(category) else {
                tracing::debug!(category = %category_name, "requirement category not inspectable here");
                continue;
            };

            let entries: Vec<RequirementStatus> = names
                .iter()
                .map(|name| RequirementStatus {
                    name: name.clone(),
                    satisfied: available.iter().any(|item| item.eq_ignore_ascii_case(name)),
                })
                .collect();

            if entries.iter().any(|entry| !entry.satisfied) {
                result.errors = true;
            }
            result.categories.push(CategoryResult { category: category_name.clone(), entries });
        }

        result
    }

    pub fn category(&self, name: &str) -> Option<&CategoryResult> {
        self.categories.iter().find(|category| category.category == name)
    }

    /// Missing requirements as `category:name`.
    pub fn missing(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|category| {
                category
                    .entries
                    .iter()
                    .filter(|entry| !entry.satisfied)
                    .map(move |entry| format!("{}:{}", category.category, entry.name))
            })
            .collect()
    }
}
