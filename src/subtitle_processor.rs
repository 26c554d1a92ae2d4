use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::timecode::Timecode;

// @module: Subtitle cues, VTT/SRT serialization and parsing

// @const: Timing line, either notation, optional VTT cue settings after the end time
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:\d+:)?\d{2}:\d{2}[,.]\d{3})\s+-->\s+((?:\d+:)?\d{2}:\d{2}[,.]\d{3})(?:\s+(.*))?$")
        .expect("timing regex is valid")
});

const VTT_HEADER: &str = "WEBVTT";

/// NOTE, STYLE or REGION block of a VTT file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataBlock {
    /// Index of the cue this block precedes (`cues.len()` when trailing)
    pub before_cue: usize,

    /// Block lines as written
    pub lines: Vec<String>,
}

/// Non-cue content of a VTT file, carried through parse and render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VttMetadata {
    /// Header block, starting with the `WEBVTT` line; empty means a bare header
    pub header: Vec<String>,

    /// Metadata blocks in file order
    pub blocks: Vec<MetadataBlock>,
}

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Text lines, top to bottom
    pub lines: Vec<String>,

    // @field: Display start
    pub start: Timecode,

    // @field: Display end
    pub end: Timecode,

    // @field: VTT cue identifier line, if any
    pub identifier: Option<String>,

    // @field: Cue settings after the end time (`align:start position:10%`)
    pub settings: Option<String>,
}

impl Cue {
    pub fn new(lines: Vec<String>, start: Timecode, end: Timecode) -> Self {
        Cue {
            lines,
            start,
            end,
            identifier: None,
            settings: None,
        }
    }

    /// Same cue with different timing, keeping identifier and settings
    pub fn with_timing(&self, start: Timecode, end: Timecode) -> Self {
        Cue {
            start,
            end,
            ..self.clone()
        }
    }

    /// Lines joined with newlines, as written in a subtitle file
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn duration_ms(&self) -> u64 {
        self.end.as_millis().saturating_sub(self.start.as_millis())
    }
}

/// Subtitle file notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    #[default]
    Vtt,
    Srt,
}

impl SubtitleFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SubtitleFormat::Vtt => "vtt",
            SubtitleFormat::Srt => "srt",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "vtt" => Some(SubtitleFormat::Vtt),
            "srt" => Some(SubtitleFormat::Srt),
            _ => None,
        }
    }

    /// Format from the file extension, falling back to the content header
    pub fn detect(path: &Path, content: &str) -> Result<Self, SubtitleError> {
        if let Some(format) = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
        {
            return Ok(format);
        }

        let first_line = content.trim_start_matches('\u{feff}').lines().next().unwrap_or("");
        if first_line.trim_start().starts_with(VTT_HEADER) {
            Ok(SubtitleFormat::Vtt)
        } else if TIMING_REGEX.is_match(content.lines().nth(1).unwrap_or("").trim()) {
            Ok(SubtitleFormat::Srt)
        } else {
            Err(SubtitleError::UnknownFormat(path.display().to_string()))
        }
    }

    fn format_timecode(self, timecode: Timecode) -> String {
        match self {
            SubtitleFormat::Vtt => timecode.to_vtt_string(),
            SubtitleFormat::Srt => timecode.to_srt_string(),
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for SubtitleFormat {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim()).ok_or_else(|| SubtitleError::UnknownFormat(s.to_string()))
    }
}

/// Serialize cues into subtitle file content
pub fn render(cues: &[Cue], format: SubtitleFormat) -> String {
    render_with_metadata(cues, format, &VttMetadata::default())
}

/// Serialize cues, writing the VTT header and metadata blocks back in place
///
/// SRT has no metadata; `metadata` is ignored for it.
pub fn render_with_metadata(cues: &[Cue], format: SubtitleFormat, metadata: &VttMetadata) -> String {
    let mut output = String::new();
    let mut blocks = metadata.blocks.iter().peekable();

    if format == SubtitleFormat::Vtt {
        if metadata.header.is_empty() {
            output.push_str(VTT_HEADER);
            output.push('\n');
        }
        for line in &metadata.header {
            output.push_str(line);
            output.push('\n');
        }
        output.push('\n');
    }

    for (index, cue) in cues.iter().enumerate() {
        match format {
            SubtitleFormat::Srt => {
                output.push_str(&(index + 1).to_string());
                output.push('\n');
            }
            SubtitleFormat::Vtt => {
                while let Some(block) = blocks.next_if(|b| b.before_cue <= index) {
                    push_block(&mut output, &block.lines);
                }
                if let Some(identifier) = &cue.identifier {
                    output.push_str(identifier);
                    output.push('\n');
                }
            }
        }
        output.push_str(&format.format_timecode(cue.start));
        output.push_str(" --> ");
        output.push_str(&format.format_timecode(cue.end));
        if let Some(settings) = &cue.settings {
            output.push(' ');
            output.push_str(settings);
        }
        output.push('\n');
        for line in &cue.lines {
            output.push_str(line);
            output.push('\n');
        }
        output.push('\n');
    }

    if format == SubtitleFormat::Vtt {
        for block in blocks {
            push_block(&mut output, &block.lines);
        }
    }

    output
}

fn push_block(output: &mut String, lines: &[String]) {
    for line in lines {
        output.push_str(line);
        output.push('\n');
    }
    output.push('\n');
}

/// Parse subtitle content in the given notation
pub fn parse(content: &str, format: SubtitleFormat) -> Result<Vec<Cue>, SubtitleError> {
    parse_with_metadata(content, format).map(|(cues, _)| cues)
}

/// Parse subtitle content, keeping the VTT header and metadata blocks
pub fn parse_with_metadata(content: &str, format: SubtitleFormat) -> Result<(Vec<Cue>, VttMetadata), SubtitleError> {
    let content = content.trim_start_matches('\u{feff}');
    let lines: Vec<&str> = content.lines().map(|l| l.trim_end_matches('\r')).collect();

    let mut cues = Vec::new();
    let mut metadata = VttMetadata::default();
    let mut index = 0;

    if format == SubtitleFormat::Vtt {
        index = vtt_header_end(&lines)?;
        metadata.header = lines[..index].iter().map(|l| l.to_string()).collect();
    }

    while index < lines.len() {
        // Blocks are separated by one or more blank lines
        while index < lines.len() && lines[index].trim().is_empty() {
            index += 1;
        }
        if index >= lines.len() {
            break;
        }

        let block_start = index;
        while index < lines.len() && !lines[index].trim().is_empty() {
            index += 1;
        }
        let block = &lines[block_start..index];

        if format == SubtitleFormat::Vtt && is_vtt_metadata_block(block[0]) {
            debug!("Keeping VTT metadata block at line {}", block_start + 1);
            metadata.blocks.push(MetadataBlock {
                before_cue: cues.len(),
                lines: block.iter().map(|l| l.to_string()).collect(),
            });
            continue;
        }

        cues.push(parse_block(block, block_start, format)?);
    }

    if cues.is_empty() {
        warn!("No subtitle cues found in content");
        return Err(SubtitleError::NoCues);
    }

    Ok((cues, metadata))
}

fn vtt_header_end(lines: &[&str]) -> Result<usize, SubtitleError> {
    match lines.first() {
        Some(first) if first.trim_start().starts_with(VTT_HEADER) => {
            // The header block runs until the first blank line
            let mut index = 1;
            while index < lines.len() && !lines[index].trim().is_empty() {
                index += 1;
            }
            Ok(index)
        }
        _ => Err(SubtitleError::Parse {
            line: 1,
            message: format!("missing {} header", VTT_HEADER),
        }),
    }
}

fn is_vtt_metadata_block(first_line: &str) -> bool {
    let first_line = first_line.trim();
    first_line == "NOTE"
        || first_line.starts_with("NOTE ")
        || first_line.starts_with("NOTE\t")
        || first_line == "STYLE"
        || first_line == "REGION"
}

fn parse_block(block: &[&str], block_start: usize, format: SubtitleFormat) -> Result<Cue, SubtitleError> {
    let timing_offset = block
        .iter()
        .position(|line| line.contains("-->"))
        .ok_or_else(|| SubtitleError::Parse {
            line: block_start + 1,
            message: "cue without timing line".to_string(),
        })?;

    let line_number = block_start + timing_offset + 1;

    // SRT: exactly one index line before the timing. VTT: at most one identifier.
    match (format, timing_offset) {
        (SubtitleFormat::Srt, 1) => {
            if block[0].trim().parse::<usize>().is_err() {
                return Err(SubtitleError::Parse {
                    line: block_start + 1,
                    message: format!("invalid cue index: {}", block[0].trim()),
                });
            }
        }
        (SubtitleFormat::Vtt, 0) | (SubtitleFormat::Vtt, 1) => {}
        _ => {
            return Err(SubtitleError::Parse {
                line: line_number,
                message: "unexpected lines before timing".to_string(),
            });
        }
    }

    let timing = block[timing_offset].trim();
    let caps = TIMING_REGEX.captures(timing).ok_or_else(|| SubtitleError::Parse {
        line: line_number,
        message: format!("invalid timing line: {}", timing),
    })?;

    let parse_time = |text: &str| {
        text.parse::<Timecode>().map_err(|e| SubtitleError::Parse {
            line: line_number,
            message: e.to_string(),
        })
    };
    let start = parse_time(&caps[1])?;
    let end = parse_time(&caps[2])?;

    let lines = block[timing_offset + 1..]
        .iter()
        .map(|l| l.to_string())
        .collect();

    let mut cue = Cue::new(lines, start, end);
    cue.settings = caps
        .get(3)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty());
    if format == SubtitleFormat::Vtt && timing_offset == 1 {
        cue.identifier = Some(block[0].trim().to_string());
    }

    Ok(cue)
}

/// Cues of one subtitle file with their origin
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// Notation of the source
    pub format: SubtitleFormat,

    /// Cues in display order
    pub cues: Vec<Cue>,

    /// VTT header and metadata blocks, empty for SRT
    pub metadata: VttMetadata,
}

impl SubtitleCollection {
    pub fn new(source_file: PathBuf, format: SubtitleFormat, cues: Vec<Cue>) -> Self {
        SubtitleCollection {
            source_file,
            format,
            cues,
            metadata: VttMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: VttMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Parse subtitle content read from `source_file`
    pub fn parse_content(source_file: &Path, content: &str) -> Result<Self> {
        let format = SubtitleFormat::detect(source_file, content)?;
        let (cues, metadata) = parse_with_metadata(content, format)
            .with_context(|| format!("Failed to parse subtitle file: {:?}", source_file))?;

        debug!("Parsed {} {} cues from {:?}", cues.len(), format, source_file);

        Ok(SubtitleCollection::new(source_file.to_path_buf(), format, cues).with_metadata(metadata))
    }

    /// Read and parse a subtitle file, detecting its notation
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        Self::parse_content(path, &content)
    }

    pub fn render(&self) -> String {
        render_with_metadata(&self.cues, self.format, &self.metadata)
    }

    /// Write the cues in this collection's notation
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path, &self.render())
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Format: {}", self.format)?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}
