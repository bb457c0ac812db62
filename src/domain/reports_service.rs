//! CSV reports over the rosters.
//!
//! Every report is a fixed-filename CSV snapshot: UTF-8 with a byte-order
//! mark, every field double-quoted (header included), `\n` line endings,
//! one row per record. A report over an empty record set is refused with
//! a typed error instead of producing a header-only file.

use anyhow::{Context, Result};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::dashboard_service::category_distribution;
use crate::domain::error::DomainError;
use crate::storage::{ChildRepository, SlotConnection, TeacherRepository};

/// A generated report, ready to be written to disk
#[derive(Debug, Clone)]
pub struct Report {
    pub filename: String,
    pub csv_content: String,
    pub row_count: usize,
}

/// Service that builds and writes the fixed CSV reports
#[derive(Clone)]
pub struct ReportsService {
    children: ChildRepository,
    teachers: TeacherRepository,
}

impl ReportsService {
    /// Create a new ReportsService
    pub fn new(connection: Arc<SlotConnection>) -> Self {
        Self {
            children: ChildRepository::new(Arc::clone(&connection)),
            teachers: TeacherRepository::new(connection),
        }
    }

    /// Children counted per class, in first-seen class order
    pub fn children_by_class(&self) -> Result<Report> {
        let children = self.children.list();
        let distribution = category_distribution(&children, |child| child.class.as_str());

        let rows: Vec<Vec<String>> = distribution
            .into_iter()
            .map(|entry| vec![entry.label, entry.count.to_string()])
            .collect();

        self.build_report("children_by_class.csv", &["Class", "Children"], rows)
    }

    /// Current roll call: every child with their live attendance mark
    pub fn attendance(&self) -> Result<Report> {
        let rows: Vec<Vec<String>> = self
            .children
            .list()
            .into_iter()
            .map(|child| {
                vec![
                    child.name,
                    child.class,
                    if child.present { "Yes" } else { "No" }.to_string(),
                ]
            })
            .collect();

        self.build_report("attendance.csv", &["Name", "Class", "Present"], rows)
    }

    /// The teaching team roster
    pub fn teachers_roster(&self) -> Result<Report> {
        let rows: Vec<Vec<String>> = self
            .teachers
            .list()
            .into_iter()
            .map(|teacher| {
                vec![
                    teacher.name,
                    teacher.role.to_string(),
                    teacher.assigned_class,
                    teacher.contact,
                ]
            })
            .collect();

        self.build_report(
            "teachers.csv",
            &["Name", "Role", "Assigned Class", "Contact"],
            rows,
        )
    }

    /// Write a report into `custom_dir`, or the Documents folder (home
    /// directory fallback) when none is given. Returns the written path.
    pub fn write_report(&self, report: &Report, custom_dir: Option<&Path>) -> Result<PathBuf> {
        let export_dir = match custom_dir {
            Some(dir) => dir.to_path_buf(),
            None => dirs::document_dir()
                .or_else(dirs::home_dir)
                .ok_or_else(|| anyhow::anyhow!("Could not determine an export directory"))?,
        };

        fs::create_dir_all(&export_dir)
            .with_context(|| format!("Failed to create export directory {:?}", export_dir))?;

        let file_path = export_dir.join(&report.filename);
        if let Err(e) = fs::write(&file_path, &report.csv_content) {
            error!("Failed to write report to {:?}: {}", file_path, e);
            return Err(e).with_context(|| format!("Failed to write report {:?}", file_path));
        }

        info!(
            "Exported {} rows to {}",
            report.row_count,
            file_path.display()
        );
        Ok(file_path)
    }

    fn build_report(
        &self,
        filename: &str,
        header: &[&str],
        rows: Vec<Vec<String>>,
    ) -> Result<Report> {
        if rows.is_empty() {
            info!("Report {} has no rows, nothing to export", filename);
            return Err(DomainError::NothingToExport.into());
        }

        let row_count = rows.len();
        let csv_content = build_csv(header, &rows)?;

        Ok(Report {
            filename: filename.to_string(),
            csv_content,
            row_count,
        })
    }
}

/// Serialize a header and rows into the export CSV shape: BOM-prefixed
/// UTF-8, every field quoted, `\n` line endings. Row widths must match
/// the header; the writer rejects ragged rows.
fn build_csv(header: &[&str], rows: &[Vec<String>]) -> Result<String> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut buffer);

        writer.write_record(header)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }

    let body = String::from_utf8(buffer).context("CSV content was not valid UTF-8")?;
    Ok(format!("\u{feff}{}", body))
}
