use crate::model::timing::*;
use log::debug;
use std::collections::HashSet;

/// Synthesizes an SV point at every tempo offset without one, so scroll speed tracks
/// `dominant_bpm`, then merges with the existing points ordered by `(offset, value)`.
///
/// Existing SV points are carried over unchanged.
pub fn compensate(
    tempo: &[TempoPoint],
    existing: &[VelocityPoint],
    dominant_bpm: f64,
) -> Vec<SvPoint> {
    let dominant_ms_per_beat = MS_PER_MINUTE / dominant_bpm;
    let covered: HashSet<i64> = existing.iter().map(|p| p.offset).collect();

    for point in existing {
        debug!(
            "Keeping SV at {}ms: x{:.3}",
            point.offset,
            point.multiplier()
        );
    }

    let mut sv: Vec<SvPoint> = existing.iter().copied().map(SvPoint::from).collect();
    for point in tempo.iter().filter(|p| !covered.contains(&p.offset)) {
        let value = -dominant_ms_per_beat / point.ms_per_beat * 100.0;
        debug!(
            "Synthesized SV at {}ms: {} (beat length {}ms)",
            point.offset, value, point.ms_per_beat
        );
        sv.push(SvPoint {
            offset: point.offset,
            value,
        });
    }

    sv.sort_by(SvPoint::cmp_key);
    sv
}
