//! PHP version, capability and directory permission checks.

use tabled::{Table, Tabled, settings::Style};

use crate::app::AppContext;
use crate::domain::permissions::failures;
use crate::domain::{
    AppError, InstalledCapabilities, PermissionStatus, RequirementResult, VersionCheck,
};

/// Everything the system check observed, before deciding pass or fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemReport {
    pub version: VersionCheck,
    pub requirements: RequirementResult,
    pub permissions: Vec<PermissionStatus>,
}

impl SystemReport {
    /// First fatal finding, in check order: version, capabilities, permissions.
    pub fn verdict(&self) -> Result<(), AppError> {
        if !self.version.supported {
            return Err(AppError::UnsupportedVersion {
                current: self.version.current.clone(),
                minimum: self.version.minimum.clone(),
            });
        }
        if self.requirements.errors {
            return Err(AppError::MissingCapabilities(self.requirements.missing()));
        }
        let denied = failures(&self.permissions);
        if !denied.is_empty() {
            return Err(AppError::PermissionDenied(denied));
        }
        Ok(())
    }
}

#[derive(Tabled)]
struct VersionRow {
    #[tabled(rename = "Full Version")]
    full: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Minimum Required")]
    minimum: String,
    #[tabled(rename = "Supported")]
    supported: String,
}

#[derive(Tabled)]
struct RequirementRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Requirement")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct PermissionRow {
    #[tabled(rename = "Folder")]
    path: String,
    #[tabled(rename = "Required Permission")]
    mode: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Gather the report without judging it.
pub fn inspect(ctx: &AppContext<'_>) -> Result<SystemReport, AppError> {
    let config = ctx.config();
    let platform = ctx.platform();

    let full = platform.php_version()?;
    let version = VersionCheck::evaluate(&full, &config.min_php_version);
    tracing::info!(full = %version.full, minimum = %version.minimum, supported = version.supported, "php version");

    let installed = InstalledCapabilities {
        php_extensions: platform.php_extensions(),
        apache_modules: if config.requirements.contains_key("apache") {
            platform.apache_modules()
        } else {
            None
        },
    };
    let requirements = RequirementResult::evaluate(&config.requirements, &installed);

    let permissions = config
        .permissions
        .iter()
        .map(|requirement| {
            PermissionStatus::evaluate(requirement, ctx.permissions().path_state(&requirement.path))
        })
        .collect();

    Ok(SystemReport { version, requirements, permissions })
}

pub fn execute(ctx: &AppContext<'_>) -> Result<SystemReport, AppError> {
    println!("🔍 Checking system requirements...");
    let report = inspect(ctx)?;
    render(&report);
    report.verdict()?;
    println!("✅ System requirements satisfied.");
    Ok(report)
}

fn mark(ok: bool) -> String {
    if ok { "✔ Yes".to_string() } else { "❌ No".to_string() }
}

fn render(report: &SystemReport) {
    println!("\n📌 PHP Version Check");
    let version = VersionRow {
        full: report.version.full.clone(),
        current: report.version.current.clone(),
        minimum: report.version.minimum.clone(),
        supported: mark(report.version.supported),
    };
    println!("{}", Table::new([version]).with(Style::sharp()));

    if !report.requirements.categories.is_empty() {
        println!("\n📌 Extensions & Modules Check");
        let rows: Vec<RequirementRow> = report
            .requirements
            .categories
            .iter()
            .flat_map(|category| {
                category.entries.iter().map(|entry| RequirementRow {
                    category: category.category.clone(),
                    name: entry.name.clone(),
                    status: if entry.satisfied { "✔".to_string() } else { "❌".to_string() },
                })
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::sharp()));
    }

    if !report.permissions.is_empty() {
        println!("\n📌 Directory Permissions Check");
        let rows: Vec<PermissionRow> = report
            .permissions
            .iter()
            .map(|status| PermissionRow {
                path: status.path.clone(),
                mode: status.mode.clone(),
                status: if status.satisfied { "✔ OK".to_string() } else { "❌ Failed".to_string() },
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::sharp()));
    }
    println!();
}
