use crate::error::{Result, SvError};
use crate::model::timing::*;
use log::{debug, warn};
use std::collections::HashMap;

/// Rounds to 6 decimal places so values differing only by float noise share a bucket.
///
/// Precision formatting rounds the exact binary value half-to-even, which a
/// `(bpm * 1e6).round()` would not.
pub fn round_bpm(bpm: f64) -> f64 {
    format!("{:.6}", bpm).parse::<f64>().unwrap_or(bpm)
}

/// Builds one segment per tempo point. The last segment ends at `song_end_ms`.
pub fn segment_durations(tempo: &[TempoPoint], song_end_ms: i64) -> Vec<TempoSegment> {
    tempo
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let end = tempo.get(i + 1).map_or(song_end_ms, |next| next.offset);
            TempoSegment {
                start: point.offset,
                end,
                bpm: point.bpm(),
            }
        })
        .collect()
}

/// Picks the BPM covering the most total time, rounded to 6 decimal places.
///
/// Buckets are kept in first-seen order and the first bucket reaching the maximum wins,
/// so ties go to the BPM that appears earliest in the map.
pub fn dominant_bpm(tempo: &[TempoPoint], song_end_ms: i64) -> Result<f64> {
    if tempo.is_empty() {
        return Err(SvError::NoTempoPoints);
    }

    if let Some(last) = tempo.last()
        && song_end_ms < last.offset
    {
        warn!(
            "Song end ({}ms) is before the last uninherited point ({}ms)..!",
            song_end_ms, last.offset
        );
    }

    // (rounded bpm, total ms) in first-seen order, indexed by the rounded value's bits
    let mut coverage: Vec<(f64, i64)> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();
    for segment in segment_durations(tempo, song_end_ms) {
        let duration = segment.duration().ok_or(SvError::TimelineOverflow {
            start: segment.start,
            end: segment.end,
        })?;

        let bpm = round_bpm(segment.bpm);
        match index.get(&bpm.to_bits()) {
            Some(&i) => {
                let total = &mut coverage[i].1;
                *total = total.checked_add(duration).ok_or(SvError::TimelineOverflow {
                    start: tempo[0].offset,
                    end: song_end_ms,
                })?;
            }
            None => {
                index.insert(bpm.to_bits(), coverage.len());
                coverage.push((bpm, duration));
            }
        }
    }

    let mut best = coverage[0];
    for &(bpm, total) in coverage.iter().skip(1) {
        if total > best.1 {
            best = (bpm, total);
        }
    }

    let bpm = best.0;
    debug!(
        "{} distinct BPM value(s), dominant {} covering {}ms",
        coverage.len(),
        bpm,
        best.1
    );

    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(SvError::DegenerateTempo(bpm));
    }

    Ok(bpm)
}
