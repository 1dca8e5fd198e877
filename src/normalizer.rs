use crate::compensator::compensate;
use crate::error::Result;
use crate::estimator::dominant_bpm;
use crate::model::timing::*;
use log::{debug, warn};

/// Runs the estimate + compensate steps over already classified points.
pub fn normalize(points: &ClassifiedPoints, song_end_ms: i64) -> Result<NormalizedTiming> {
    let dominant_bpm = dominant_bpm(&points.tempo, song_end_ms)?;

    if let (Some(first_tempo), Some(first_sv)) = (points.tempo.first(), points.velocity.first())
        && first_sv.offset < first_tempo.offset
    {
        warn!(
            "Inherited point at {}ms comes before the first uninherited point at {}ms..!",
            first_sv.offset, first_tempo.offset
        );
    }

    let sv = compensate(&points.tempo, &points.velocity, dominant_bpm);
    let synthesized = sv.len() - points.velocity.len();

    debug!(
        "Dominant BPM {}: {} SV point(s), {} synthesized",
        dominant_bpm,
        sv.len(),
        synthesized
    );

    Ok(NormalizedTiming {
        dominant_bpm,
        tempo: points.tempo.clone(),
        sv,
        synthesized,
    })
}
