use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::adjuster;
use crate::app_config::Config;
use crate::boundary::{provider_for, EntityDictionary};
use crate::file_utils::{FileManager, ADJUSTED_SUFFIX};
use crate::language_utils;
use crate::segmentation;
use crate::subtitle_processor::{self, Cue, SubtitleCollection, SubtitleFormat};
use crate::transcript::Transcript;

// @module: Application controller for segmentation and adjustment workflows

/// Outcome counts of a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Entity phrases loaded from `entities_file`
    entities: EntityDictionary,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let entities = match &config.entities_file {
            Some(path) => {
                let entities = EntityDictionary::from_file(path)
                    .with_context(|| format!("Failed to load entity definitions: {:?}", path))?;
                debug!("Loaded {} entity phrases from {:?}", entities.len(), path);
                entities
            }
            None => EntityDictionary::default(),
        };

        Ok(Self { config, entities })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Turn a transcript into cues using the configured boundary strategy
    pub fn segment_transcript(&self, transcript: &Transcript) -> Result<Vec<Cue>> {
        let language = self.resolve_language(transcript);
        let provider = provider_for(&self.config.boundaries, &language, self.entities.clone())
            .with_context(|| format!("Cannot analyze boundaries for language '{}'", language))?;

        debug!(
            "Segmenting {} words with {} boundaries ({})",
            transcript.words.len(),
            self.config.boundaries,
            language
        );

        let cues = segmentation::segment_words(&transcript.words, provider.as_ref(), &self.config.segmentation)?;
        Ok(cues)
    }

    /// Segment one transcript; without `output` the subtitles go to stdout
    ///
    /// Returns the written path, or `None` for stdout and skipped files.
    pub async fn segment_file(&self, input_file: &Path, output: Option<&Path>, force_overwrite: bool) -> Result<Option<PathBuf>> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        if let Some(output) = output {
            if output.exists() && !force_overwrite {
                warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output);
                return Ok(None);
            }
        }

        let start_time = Instant::now();
        let content = tokio::fs::read_to_string(input_file)
            .await
            .with_context(|| format!("Failed to read transcript: {:?}", input_file))?;
        let transcript = Transcript::from_json_str(&content)
            .with_context(|| format!("Invalid transcript: {:?}", input_file))?;

        let cues = self
            .segment_transcript(&transcript)
            .with_context(|| format!("Failed to segment {:?}", input_file))?;
        let format = match output {
            Some(path) => Self::output_format_for(path, self.config.output_format),
            None => self.config.output_format,
        };
        let rendered = subtitle_processor::render(&cues, format);

        match output {
            Some(path) => {
                Self::write_output(path, &rendered).await?;
                info!(
                    "Wrote {} cues to {:?} in {}",
                    cues.len(),
                    path,
                    Self::format_duration(start_time.elapsed())
                );
                Ok(Some(path.to_path_buf()))
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(rendered.as_bytes())
                    .context("Failed to write subtitles to stdout")?;
                stdout.flush().context("Failed to flush stdout")?;
                Ok(None)
            }
        }
    }

    /// Segment every transcript in a directory, writing `<stem>.<format>` next to each
    pub async fn segment_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        let extension = self.config.output_format.extension();
        let files = Self::collect_files(input_dir, &["json"], "transcript")?;

        self.run_folder(&files, "Segmenting", |file| {
            let output = FileManager::subtitle_output_path(file, extension);
            async move { self.segment_file(file, Some(&output), force_overwrite).await }
        })
        .await
    }

    /// Extend cue end times of one subtitle file
    ///
    /// Writes `<stem>.adjusted.<ext>` unless `output` is given; the output
    /// keeps the input's notation.
    pub async fn adjust_file(&self, input_file: &Path, output: Option<&Path>, force_overwrite: bool) -> Result<Option<PathBuf>> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| FileManager::adjusted_output_path(input_file));
        if output.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output);
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(input_file)
            .await
            .with_context(|| format!("Failed to read subtitle file: {:?}", input_file))?;
        let collection = SubtitleCollection::parse_content(input_file, &content)?;

        let adjusted = self.adjust_collection(&collection)?;
        Self::write_output(&output, &adjusted.render()).await?;
        info!("Adjusted {} cues into {:?}", adjusted.cues.len(), output);

        Ok(Some(output))
    }

    /// Apply the configured buffer to a parsed collection
    pub fn adjust_collection(&self, collection: &SubtitleCollection) -> Result<SubtitleCollection> {
        let buffer = self.config.adjustment.buffer_seconds;
        let cues = adjuster::adjust(&collection.cues, buffer)
            .with_context(|| format!("Cannot adjust {:?}", collection.source_file))?;
        Ok(SubtitleCollection::new(collection.source_file.clone(), collection.format, cues)
            .with_metadata(collection.metadata.clone()))
    }

    /// Adjust every subtitle file in a directory, ignoring earlier `.adjusted` outputs
    pub async fn adjust_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        let files: Vec<PathBuf> = Self::collect_files(input_dir, &["vtt", "srt"], "subtitle")?
            .into_iter()
            .filter(|file| !Self::is_adjusted_output(file))
            .collect();

        self.run_folder(&files, "Adjusting", |file| async move {
            self.adjust_file(file, None, force_overwrite).await
        })
        .await
    }

    fn collect_files(input_dir: &Path, extensions: &[&str], kind: &str) -> Result<Vec<PathBuf>> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }
        let files = FileManager::find_files(input_dir, extensions)?;
        if files.is_empty() {
            return Err(anyhow!("No {} files found in directory: {:?}", kind, input_dir));
        }
        Ok(files)
    }

    /// Run `process` on each file in order; failures are logged and skipped
    async fn run_folder<'a, F, Fut>(&'a self, files: &'a [PathBuf], action: &str, process: F) -> Result<FolderSummary>
    where
        F: Fn(&'a Path) -> Fut,
        Fut: std::future::Future<Output = Result<Option<PathBuf>>> + 'a,
    {
        let start_time = Instant::now();
        let progress_bar = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();
        for file in files {
            let file_name = file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress_bar.set_message(format!("{}: {}", action, file_name));

            match process(file.as_path()).await {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    progress_bar.suspend(|| error!("Error processing file {}: {:#}", file_name, e));
                    summary.failed += 1;
                }
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed in {}: {} processed, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            summary.processed,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    /// Configured language, then the transcript's own, then detection
    fn resolve_language(&self, transcript: &Transcript) -> String {
        if let Some(language) = &self.config.language {
            if let Some(reported) = &transcript.language {
                if !language_utils::language_codes_match(language, reported) {
                    warn!(
                        "Configured language '{}' overrides transcript language '{}'",
                        language, reported
                    );
                }
            }
            return language.clone();
        }
        if let Some(language) = &transcript.language {
            return language.clone();
        }

        let detected = language_utils::detect_language(&transcript.text());
        let name = language_utils::get_language_name(detected).unwrap_or_else(|_| detected.to_string());
        info!("No language configured, detected {}", name);
        detected.to_string()
    }

    fn output_format_for(path: &Path, fallback: SubtitleFormat) -> SubtitleFormat {
        path.extension()
            .and_then(|ext| SubtitleFormat::from_extension(&ext.to_string_lossy()))
            .unwrap_or(fallback)
    }

    fn is_adjusted_output(path: &Path) -> bool {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().ends_with(&format!(".{}", ADJUSTED_SUFFIX)))
            .unwrap_or(false)
    }

    async fn write_output(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            FileManager::ensure_dir(parent)?;
        }
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write to file: {:?}", path))
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
