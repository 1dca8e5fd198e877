use crate::classifier::classify_timing_points;
use crate::error::{Result as SvResult, SvError};
use crate::model::config::NormalizeOptions;
use crate::model::timing::*;
use crate::normalizer::normalize;
use crate::util::adjusted_path;
use anyhow::{Result, anyhow, bail};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub const TIMING_POINTS_SECTION: &str = "TimingPoints";
pub const HIT_OBJECTS_SECTION: &str = "HitObjects";

const HIT_OBJECT_TIME_FIELD: usize = 2;

/// A loaded `.osu` file, kept line by line (terminators included) so anything outside
/// the timing section is written back untouched.
#[derive(Debug, Clone)]
pub struct Beatmap {
    lines: Vec<String>,
    timing_header: usize,
    timing: Range<usize>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NormalizeReport {
    pub output: PathBuf,
    pub written: bool,
    pub song_end_ms: i64,
    pub timing: NormalizedTiming,
}

impl Beatmap {
    pub fn parse(text: &str) -> SvResult<Self> {
        let lines: Vec<String> = text.split_inclusive('\n').map(String::from).collect();

        let timing_header = find_section(&lines, TIMING_POINTS_SECTION)
            .ok_or(SvError::MissingSection(TIMING_POINTS_SECTION))?;

        let start = timing_header + 1;
        let end = lines[start..]
            .iter()
            .position(|l| l.trim().is_empty())
            .map_or(lines.len(), |n| start + n);

        debug!(
            "[{}] found on line {}, {} record line(s)",
            TIMING_POINTS_SECTION,
            timing_header + 1,
            end - start
        );

        Ok(Self {
            lines,
            timing_header,
            timing: start..end,
        })
    }

    pub fn timing_lines(&self) -> &[String] {
        &self.lines[self.timing.clone()]
    }

    /// Latest hit object start plus the end margin, or the configured default when
    /// the map has no hit objects.
    pub fn song_end_ms(&self, opts: &NormalizeOptions) -> SvResult<i64> {
        let Some(header) = find_section(&self.lines, HIT_OBJECTS_SECTION) else {
            warn!(
                "No [{}] section, assuming the song ends at {}ms..!",
                HIT_OBJECTS_SECTION, opts.default_song_end_ms
            );
            return Ok(opts.default_song_end_ms);
        };

        let mut last_hit: Option<(i64, &str)> = None;
        for line in self.lines[header + 1..].iter().map(|l| l.trim()) {
            if is_section_header(line) {
                break;
            }
            if line.is_empty() || line.starts_with("//") {
                continue;
            }

            let field = line
                .split(',')
                .nth(HIT_OBJECT_TIME_FIELD)
                .ok_or_else(|| SvError::malformed(line, "start time", "is missing"))?;
            let time = field.trim().parse::<i64>().map_err(|e| {
                SvError::malformed(line, "start time", format!("`{}`: {}", field, e))
            })?;

            if last_hit.is_none_or(|(t, _)| time > t) {
                last_hit = Some((time, line));
            }
        }

        match last_hit {
            Some((t, line)) => t.checked_add(opts.end_margin_ms).ok_or_else(|| {
                SvError::malformed(
                    line,
                    "start time",
                    format!("plus the {}ms end margin overflows", opts.end_margin_ms),
                )
            }),
            None => {
                warn!(
                    "No hit objects, assuming the song ends at {}ms..!",
                    opts.default_song_end_ms
                );
                Ok(opts.default_song_end_ms)
            }
        }
    }

    /// The whole file with the timing section replaced. Uninherited points come first
    /// in their original order, then every SV point.
    pub fn render(&self, timing: &NormalizedTiming) -> String {
        let header = &self.lines[self.timing_header];
        let eol = if header.ends_with("\r\n") { "\r\n" } else { "\n" };

        let mut out = String::new();
        for line in &self.lines[..self.timing.start] {
            out.push_str(line);
        }
        if !header.ends_with('\n') {
            out.push_str(eol);
        }

        for point in &timing.tempo {
            out.push_str(&format_tempo_record(point));
            out.push_str(eol);
        }
        for point in &timing.sv {
            out.push_str(&format_sv_record(point));
            out.push_str(eol);
        }

        for line in &self.lines[self.timing.end..] {
            out.push_str(line);
        }

        out
    }
}

pub fn format_tempo_record(point: &TempoPoint) -> String {
    format!("{},{:?},4,1,0,100,1,0", point.offset, point.ms_per_beat)
}

pub fn format_sv_record(point: &SvPoint) -> String {
    format!("{},{:.15},4,1,0,100,0,0", point.offset, point.value)
}

fn is_section_header(trimmed: &str) -> bool {
    trimmed.starts_with('[') && trimmed.ends_with(']')
}

fn find_section(lines: &[String], name: &str) -> Option<usize> {
    lines.iter().position(|l| {
        let trimmed = l.trim();
        is_section_header(trimmed) && &trimmed[1..trimmed.len() - 1] == name
    })
}

/// Classifies, estimates and compensates one beatmap's text.
pub fn normalize_beatmap(
    text: &str,
    opts: &NormalizeOptions,
) -> SvResult<(String, i64, NormalizedTiming)> {
    let beatmap = Beatmap::parse(text)?;
    let points = classify_timing_points(beatmap.timing_lines())?;
    let song_end_ms = beatmap.song_end_ms(opts)?;
    let timing = normalize(&points, song_end_ms)?;

    Ok((beatmap.render(&timing), song_end_ms, timing))
}

/// Rewrites the beatmap at `path`. Nothing is written unless every step succeeds,
/// and nothing at all on a dry run.
pub fn normalize_file<P: AsRef<Path>>(
    path: P,
    output: Option<PathBuf>,
    opts: &NormalizeOptions,
) -> Result<NormalizeReport> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read beatmap {}: {}", path.display(), e))?;

    let output = output.unwrap_or_else(|| adjusted_path(path, &opts.suffix));
    if output == path {
        bail!(
            "Refusing to overwrite the input beatmap {}..!",
            path.display()
        );
    }

    let (rendered, song_end_ms, timing) = normalize_beatmap(&text, opts)
        .map_err(|e| anyhow!("Failed to normalize {}: {}", path.display(), e))?;

    info!(
        "Dominant BPM: {} | {} uninherited point(s), {} SV point(s) ({} new) | song end {}ms",
        timing.dominant_bpm,
        timing.tempo.len(),
        timing.sv.len(),
        timing.synthesized,
        song_end_ms
    );

    if opts.verbose {
        for point in &timing.sv {
            info!("SV {}", format_sv_record(point));
        }
    }

    let written = !opts.dry_run;
    if written {
        fs::write(&output, rendered)
            .map_err(|e| anyhow!("Failed to write {}: {}", output.display(), e))?;
    }

    Ok(NormalizeReport {
        output,
        written,
        song_end_ms,
        timing,
    })
}
