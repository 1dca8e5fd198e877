use crate::error::{Result, SvError};
use crate::model::timing::*;
use log::{debug, warn};

const MIN_FIELDS: usize = 8;
const OFFSET_FIELD: usize = 0;
const BEAT_LENGTH_FIELD: usize = 1;
const UNINHERITED_FIELD: usize = 6;

/// Splits the raw `[TimingPoints]` lines into tempo points and SV points, keeping source order.
///
/// Blank lines, `//` comments and records with fewer than 8 fields are skipped.
/// A numeric field that fails to parse fails the whole section.
pub fn classify_timing_points<S: AsRef<str>>(lines: &[S]) -> Result<ClassifiedPoints> {
    let mut points = ClassifiedPoints::default();

    let mut last_offset: Option<i64> = None;
    for line in lines {
        let Some(point) = parse_timing_point(line.as_ref())? else {
            continue;
        };

        if let Some(last) = last_offset
            && point.offset() < last
        {
            warn!(
                "Timing point at {}ms comes after one at {}ms, the section is out of order..!",
                point.offset(),
                last
            );
        }
        last_offset = Some(point.offset());

        match point {
            TimingPoint::Tempo(p) => points.tempo.push(p),
            TimingPoint::Velocity(p) => points.velocity.push(p),
        }
    }

    debug!(
        "Classified {} uninherited and {} inherited timing points",
        points.tempo.len(),
        points.velocity.len()
    );

    Ok(points)
}

/// Parses a single record, returning `None` for lines that carry no timing point.
pub fn parse_timing_point(line: &str) -> Result<Option<TimingPoint>> {
    let record = line.trim();
    if record.is_empty() || record.starts_with("//") {
        return Ok(None);
    }

    let fields: Vec<&str> = record.split(',').collect();
    if fields.len() < MIN_FIELDS {
        debug!(
            "Skipping short timing record ({} fields): {}",
            fields.len(),
            record
        );
        return Ok(None);
    }

    let offset = parse_offset(record, fields[OFFSET_FIELD])?;
    let beat_length = parse_real(record, fields[BEAT_LENGTH_FIELD], "beat length")?;

    if fields[UNINHERITED_FIELD].trim() == "1" {
        if !beat_length.is_finite() || beat_length <= 0.0 {
            return Err(SvError::malformed(
                record,
                "beat length",
                format!("must be a positive number of milliseconds, got {}", beat_length),
            ));
        }

        Ok(Some(TimingPoint::Tempo(TempoPoint {
            offset,
            ms_per_beat: beat_length,
        })))
    } else {
        Ok(Some(TimingPoint::Velocity(VelocityPoint {
            offset,
            beat_length,
        })))
    }
}

/// Offsets may be written fractional and are truncated toward zero.
fn parse_offset(record: &str, text: &str) -> Result<i64> {
    let offset = parse_real(record, text, "offset")?.trunc();

    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if !offset.is_finite() || offset < i64::MIN as f64 || offset >= i64::MAX as f64 {
        return Err(SvError::malformed(
            record,
            "offset",
            format!("`{}` is not a usable millisecond offset", text.trim()),
        ));
    }

    Ok(offset as i64)
}

fn parse_real(record: &str, text: &str, field: &'static str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| SvError::malformed(record, field, format!("`{}`: {}", text, e)))
}
