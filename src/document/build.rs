//! Build state machine and the top-level `generate` entry point.
//!
//! A [`Document`] moves through
//! `Empty -> Assembling -> Assembled -> Finalized -> Exported`.
//! Every operation checks the current state, so an artifact can never be
//! exported with provisional page numbers.

use super::assembler::{Assembler, Assembly};
use super::chrome::ChromeStamper;
use super::finalizer::{finalize, FinalizeReport};
use super::page::PageCollection;
use super::script::{ContentBlock, ContentScript};
use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::layout::cursor::Cursor;
use crate::layout::measure::TextMeasurer;
use crate::writer::{FontManager, PdfWriter, PdfWriterConfig};
use chrono::{DateTime, Local};
use std::fmt;
use std::path::Path;

/// Where a build is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// No content yet
    Empty,
    /// Content is being laid out with provisional headers
    Assembling,
    /// Page count is fixed
    Assembled,
    /// Every page carries the true total
    Finalized,
    /// The artifact has been produced; layout state is discarded
    Exported,
}

impl BuildState {
    /// Lower-case name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            BuildState::Empty => "empty",
            BuildState::Assembling => "assembling",
            BuildState::Assembled => "assembled",
            BuildState::Finalized => "finalized",
            BuildState::Exported => "exported",
        }
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-fatal findings of a build.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildWarning {
    /// The authored page-count estimate disagrees with the real count
    PageEstimateMismatch {
        /// Authored estimate
        estimated: usize,
        /// Pages actually produced
        actual: usize,
    },
    /// A single word was wider than its column and overflows it
    OverflowingWord {
        /// Page the word was written on
        page: usize,
        /// The word
        word: String,
        /// Its measured width
        width: f32,
        /// Width of the column
        column: f32,
    },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::PageEstimateMismatch { estimated, actual } => {
                write!(f, "estimated {} pages, produced {}", estimated, actual)
            },
            BuildWarning::OverflowingWord {
                page,
                word,
                width,
                column,
            } => write!(
                f,
                "page {}: '{}' is {:.1}pt wide, column is {:.1}pt",
                page, word, width, column
            ),
        }
    }
}

/// One in-flight build: configuration, measurer, pages and cursor.
///
/// Builds never share state; run concurrent builds on separate documents.
pub struct Document<M: TextMeasurer = FontManager> {
    config: LayoutConfig,
    measurer: M,
    stamper: ChromeStamper,
    build_time: DateTime<Local>,
    state: BuildState,
    assembly: Assembly,
    warnings: Vec<BuildWarning>,
}

impl Document<FontManager> {
    /// Create a document measured with the Base-14 font metrics.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        Self::with_measurer(config, FontManager::new())
    }
}

impl<M: TextMeasurer> Document<M> {
    /// Create a document with a custom measurement provider.
    pub fn with_measurer(config: LayoutConfig, measurer: M) -> Result<Self> {
        config.validate()?;
        let build_time = Local::now();
        let stamper = ChromeStamper::new(&config, format_date(&build_time));
        Ok(Self {
            config,
            measurer,
            stamper,
            build_time,
            state: BuildState::Empty,
            assembly: Assembly::default(),
            warnings: Vec::new(),
        })
    }

    /// Pin the build time printed as `{date}` and written as creation date.
    ///
    /// Only possible before any content is added.
    pub fn with_build_time(mut self, time: DateTime<Local>) -> Result<Self> {
        self.require("set the build time", &[BuildState::Empty])?;
        self.stamper = ChromeStamper::new(&self.config, format_date(&time));
        self.build_time = time;
        Ok(self)
    }

    /// Current state.
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Layout configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Warnings collected so far.
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    /// Pages laid out so far. Empty once exported.
    pub fn pages(&self) -> &PageCollection {
        &self.assembly.pages
    }

    /// Number of pages laid out so far.
    pub fn page_count(&self) -> usize {
        self.assembly.pages.len()
    }

    /// Current write position.
    pub fn cursor(&self) -> Cursor {
        self.assembly.cursor
    }

    fn require(&self, operation: &'static str, allowed: &[BuildState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(Error::InvalidState {
                operation,
                state: self.state.name(),
            })
        }
    }

    fn assembler(&mut self) -> Assembler<'_, M> {
        Assembler::new(
            &self.config,
            &self.measurer,
            &self.stamper,
            &mut self.assembly,
            &mut self.warnings,
        )
    }

    /// Start assembling: open the first page with a provisional header.
    pub fn begin(&mut self) -> Result<()> {
        self.require("begin assembly", &[BuildState::Empty])?;
        self.assembly.provisional_total = self.config.provisional_total();
        self.assembler().begin()?;
        self.state = BuildState::Assembling;
        log::debug!("assembling (provisional total {})", self.assembly.provisional_total);
        Ok(())
    }

    /// Lay out one block.
    pub fn add(&mut self, block: &ContentBlock) -> Result<()> {
        self.require("add content", &[BuildState::Empty, BuildState::Assembling])?;
        if self.state == BuildState::Empty {
            self.begin()?;
        }
        self.assembler().emit(block)
    }

    /// Lay out every block of a script.
    pub fn add_script(&mut self, script: &ContentScript) -> Result<()> {
        self.require("add content", &[BuildState::Empty, BuildState::Assembling])?;
        if self.state == BuildState::Empty {
            self.begin()?;
        }
        self.assembler().emit_all(script.blocks())
    }

    /// Close the last page and fix the page count.
    pub fn close(&mut self) -> Result<usize> {
        self.require("close assembly", &[BuildState::Assembling])?;
        let total = self.assembler().finish()?;
        self.state = BuildState::Assembled;
        log::debug!("assembled {} pages", total);
        Ok(total)
    }

    /// Re-stamp every page with the true total.
    ///
    /// May run again on a finalized document; the chrome comes out identical.
    pub fn finalize(&mut self) -> Result<FinalizeReport> {
        self.require("finalize", &[BuildState::Assembled, BuildState::Finalized])?;
        let report = finalize(
            &mut self.assembly.pages,
            &self.stamper,
            &self.measurer,
            self.config.estimated_total_pages,
        )?;

        if self.record_estimate(&report) {
            log::warn!(
                "document has {} pages but the estimate is {}; update the estimate",
                report.total_pages,
                self.config.estimated_total_pages
            );
        }
        self.state = BuildState::Finalized;
        Ok(report)
    }

    /// Keep at most one estimate warning. Returns whether it is new.
    fn record_estimate(&mut self, report: &FinalizeReport) -> bool {
        let known = self
            .warnings
            .iter()
            .any(|w| matches!(w, BuildWarning::PageEstimateMismatch { .. }));
        self.warnings
            .retain(|w| !matches!(w, BuildWarning::PageEstimateMismatch { .. }));
        match report.mismatch {
            Some(estimated) => {
                self.warnings.push(BuildWarning::PageEstimateMismatch {
                    estimated,
                    actual: report.total_pages,
                });
                !known
            },
            None => false,
        }
    }

    /// Produce the PDF and discard the layout state.
    pub fn export(&mut self) -> Result<Vec<u8>> {
        self.require("export", &[BuildState::Finalized])?;

        let meta = &self.config.metadata;
        let mut writer_config = PdfWriterConfig::default()
            .with_compress(self.config.compress)
            .with_creation_date(&self.build_time);
        writer_config.title = meta.title.clone();
        writer_config.author = meta.author.clone();
        writer_config.subject = meta.subject.clone();

        let mut writer = PdfWriter::with_config(writer_config);
        for page in self.assembly.pages.iter() {
            writer.add_page(page.width(), page.height(), page.render()?, page.fonts_used());
        }
        let bytes = writer.finish()?;

        let pages = std::mem::take(&mut self.assembly).pages.len();
        self.state = BuildState::Exported;
        log::info!("exported {} pages ({} bytes)", pages, bytes.len());
        Ok(bytes)
    }

    /// Export and write the PDF to `path`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.export()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Run every phase over `script` and export.
    pub fn run(mut self, script: &ContentScript) -> Result<Vec<u8>> {
        self.begin()?;
        self.add_script(script)?;
        self.close()?;
        self.finalize()?;
        self.export()
    }
}

fn format_date(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d").to_string()
}

/// Build a PDF from `script` with the Base-14 font metrics.
///
/// Any failure is reported as a single [`Error::GenerationFailed`]; no
/// partial output is returned.
pub fn generate(config: LayoutConfig, script: &ContentScript) -> Result<Vec<u8>> {
    generate_with(config, script, FontManager::new())
}

/// [`generate`] with a custom measurement provider.
pub fn generate_with<M: TextMeasurer>(
    config: LayoutConfig,
    script: &ContentScript,
    measurer: M,
) -> Result<Vec<u8>> {
    Document::with_measurer(config, measurer)
        .and_then(|doc| doc.run(script))
        .map_err(|err| {
            log::error!("document generation failed: {}", err);
            err.into_generation_failure()
        })
}
