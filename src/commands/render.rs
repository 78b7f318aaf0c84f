//! Terminal rendering of diffs responses
//!
//! Patches follow `git diff` output, colored when the output is a terminal.

use crate::artifacts::diff::diff_file::{ChangeKind, DiffFileRecord, Hunk, LineKind};
use crate::artifacts::diff::diff_view::DiffViewMode;
use crate::artifacts::diff::file_collection::DiffFileCollection;
use crate::artifacts::diff::paginator::DiffBatch;
use crate::artifacts::diff::tree_diff::DiffFilter;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::SHORT_OBJECT_ID_LENGTH;
use crate::commands::diffs::{DiffForPath, DiffsPayload, DiffsResponse};
use colored::Colorize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub name_status: bool,
    pub filter: DiffFilter,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            name_status: false,
            filter: DiffFilter::all(),
        }
    }
}

pub struct PatchPrinter<W: Write> {
    writer: W,
    options: RenderOptions,
}

impl<W: Write> PatchPrinter<W> {
    pub fn new(writer: W, options: RenderOptions) -> Self {
        PatchPrinter { writer, options }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn print_response(&mut self, response: &DiffsResponse) -> anyhow::Result<()> {
        match &response.payload {
            DiffsPayload::Full(collection) => self.print_collection(collection)?,
            DiffsPayload::SinglePath(diff) => self.print_diff_for_path(diff)?,
            DiffsPayload::Batch(batch) => self.print_batch(batch)?,
        }

        if let Some(view) = response.view {
            self.print_view(view)?;
        }

        Ok(())
    }

    pub fn print_collection(&mut self, collection: &DiffFileCollection) -> anyhow::Result<()> {
        self.print_files(collection.files())
    }

    pub fn print_batch(&mut self, batch: &DiffBatch) -> anyhow::Result<()> {
        self.print_files(batch.files())?;

        let pagination = &batch.pagination;
        let next_page = pagination
            .next_page
            .map_or_else(|| "none".to_string(), |page| page.to_string());
        writeln!(
            self.writer,
            "{}",
            format!(
                "# page {} of {}, next page: {}",
                pagination.current_page, pagination.total_pages, next_page
            )
            .dimmed()
        )?;

        Ok(())
    }

    pub fn print_diff_for_path(&mut self, diff: &DiffForPath) -> anyhow::Result<()> {
        self.print_file(&diff.file)?;

        let attrs = &diff.default_attrs;
        let commit_id = attrs
            .commit_id
            .as_ref()
            .map_or_else(|| "none".to_string(), ObjectId::to_string);
        writeln!(
            self.writer,
            "{}",
            format!(
                "# notes {}, noteable {} {}, commit {}",
                if diff.disabled { "disabled" } else { "enabled" },
                attrs.noteable_type,
                attrs.noteable_id,
                commit_id
            )
            .dimmed()
        )?;

        Ok(())
    }

    pub fn print_view(&mut self, view: DiffViewMode) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", format!("# view {view}").dimmed())?;
        Ok(())
    }

    fn print_files(&mut self, files: &[DiffFileRecord]) -> anyhow::Result<()> {
        let filter = self.options.filter;
        files
            .iter()
            .filter(|file| filter.matches(file.change_kind))
            .try_for_each(|file| self.print_file(file))
    }

    fn print_file(&mut self, file: &DiffFileRecord) -> anyhow::Result<()> {
        if self.options.name_status {
            self.print_name_status(file)
        } else {
            self.print_patch(file)
        }
    }

    fn print_name_status(&mut self, file: &DiffFileRecord) -> anyhow::Result<()> {
        match (&file.change_kind, &file.old_path) {
            (ChangeKind::Renamed, Some(old_path)) => writeln!(
                self.writer,
                "R100\t{}\t{}",
                old_path.display(),
                file.file_path().display()
            )?,
            (kind, _) => writeln!(
                self.writer,
                "{}\t{}",
                kind.status_char(),
                file.file_path().display()
            )?,
        }

        Ok(())
    }

    fn print_patch(&mut self, file: &DiffFileRecord) -> anyhow::Result<()> {
        let old_path = file.old_path.as_deref().unwrap_or_else(|| file.file_path());
        let new_path = file.new_path.as_deref().unwrap_or_else(|| file.file_path());

        writeln!(
            self.writer,
            "{}",
            format!(
                "diff --git {} {}",
                Path::new("a").join(old_path).display(),
                Path::new("b").join(new_path).display()
            )
            .bold()
        )?;
        self.print_patch_mode(file)?;

        if file.change_kind == ChangeKind::Renamed {
            for line in [
                "similarity index 100%".to_string(),
                format!("rename from {}", old_path.display()),
                format!("rename to {}", new_path.display()),
            ] {
                writeln!(self.writer, "{}", line.bold())?;
            }
            return Ok(());
        }

        if file.old_oid == file.new_oid {
            return Ok(());
        }

        let mut oid_range = format!(
            "index {}..{}",
            short_oid(file.old_oid.as_ref()),
            short_oid(file.new_oid.as_ref())
        );
        if let (Some(old_mode), Some(new_mode)) = (file.old_mode, file.new_mode)
            && old_mode == new_mode
        {
            oid_range.push_str(&format!(" {old_mode}"));
        }
        writeln!(self.writer, "{}", oid_range.bold())?;

        let old_label = file.old_path.as_deref().map_or_else(
            || "/dev/null".to_string(),
            |path| Path::new("a").join(path).display().to_string(),
        );
        let new_label = file.new_path.as_deref().map_or_else(
            || "/dev/null".to_string(),
            |path| Path::new("b").join(path).display().to_string(),
        );

        if file.is_binary {
            writeln!(self.writer, "Binary files {old_label} and {new_label} differ")?;
            return Ok(());
        }

        writeln!(self.writer, "{}", format!("--- {old_label}").bold())?;
        writeln!(self.writer, "{}", format!("+++ {new_label}").bold())?;

        for hunk in &file.hunks {
            self.print_hunk(hunk)?;
        }

        Ok(())
    }

    fn print_patch_mode(&mut self, file: &DiffFileRecord) -> anyhow::Result<()> {
        match (file.old_mode, file.new_mode) {
            (None, Some(mode)) => {
                writeln!(self.writer, "{}", format!("new file mode {}", mode).bold())?
            }
            (Some(mode), None) => writeln!(
                self.writer,
                "{}",
                format!("deleted file mode {}", mode).bold()
            )?,
            (Some(old_mode), Some(new_mode)) if old_mode != new_mode => {
                writeln!(self.writer, "{}", format!("old mode {}", old_mode).bold())?;
                writeln!(self.writer, "{}", format!("new mode {}", new_mode).bold())?;
            }
            _ => {}
        }

        Ok(())
    }

    fn print_hunk(&mut self, hunk: &Hunk) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", hunk.header().cyan())?;

        for line in &hunk.lines {
            let text = line.to_string();
            match line.kind {
                LineKind::Added => writeln!(self.writer, "{}", text.green())?,
                LineKind::Removed => writeln!(self.writer, "{}", text.red())?,
                LineKind::Context => writeln!(self.writer, "{text}")?,
            }
        }

        Ok(())
    }
}

fn short_oid(oid: Option<&ObjectId>) -> String {
    oid.map_or_else(|| "0".repeat(SHORT_OBJECT_ID_LENGTH), ObjectId::to_short_oid)
}
