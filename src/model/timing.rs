use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const MS_PER_MINUTE: f64 = 60_000.0;

/// An uninherited timing point. Sets the beat length from `offset` until the next one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TempoPoint {
    pub offset: i64,
    pub ms_per_beat: f64,
}

impl TempoPoint {
    pub fn bpm(&self) -> f64 {
        MS_PER_MINUTE / self.ms_per_beat
    }
}

/// An inherited timing point. `beat_length` is the negative inverse SV percentage
/// as stored in the file, ie. `-100 / beat_length` is the multiplier.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct VelocityPoint {
    pub offset: i64,
    pub beat_length: f64,
}

impl VelocityPoint {
    pub fn multiplier(&self) -> f64 {
        -100.0 / self.beat_length
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum TimingPoint {
    Tempo(TempoPoint),
    Velocity(VelocityPoint),
}

impl TimingPoint {
    pub fn offset(&self) -> i64 {
        match self {
            TimingPoint::Tempo(p) => p.offset,
            TimingPoint::Velocity(p) => p.offset,
        }
    }
}

/// Half-open `[start, end)` span governed by a single tempo point.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TempoSegment {
    pub start: i64,
    pub end: i64,
    pub bpm: f64,
}

impl TempoSegment {
    /// `None` when the span does not fit in an `i64`.
    pub fn duration(&self) -> Option<i64> {
        self.end.checked_sub(self.start)
    }
}

/// An SV point in the rewritten section, existing or synthesized.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SvPoint {
    pub offset: i64,
    pub value: f64,
}

impl SvPoint {
    /// Orders by offset, then by value.
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.offset
            .cmp(&other.offset)
            .then_with(|| self.value.total_cmp(&other.value))
    }
}

impl From<VelocityPoint> for SvPoint {
    fn from(point: VelocityPoint) -> Self {
        SvPoint {
            offset: point.offset,
            value: point.beat_length,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ClassifiedPoints {
    pub tempo: Vec<TempoPoint>,
    pub velocity: Vec<VelocityPoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NormalizedTiming {
    pub dominant_bpm: f64,
    pub tempo: Vec<TempoPoint>,
    pub sv: Vec<SvPoint>,
    /// How many entries of `sv` were synthesized rather than carried over.
    pub synthesized: usize,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn point_accessors() {
        let tempo = TimingPoint::Tempo(TempoPoint { offset: 1500, ms_per_beat: 500.0 });
        let velocity = TimingPoint::Velocity(VelocityPoint { offset: 2000, beat_length: -50.0 });

        assert_eq!(tempo.offset(), 1500);
        assert_eq!(velocity.offset(), 2000);
        assert_eq!(TempoPoint { offset: 0, ms_per_beat: 500.0 }.bpm(), 120.0);
        assert_eq!(VelocityPoint { offset: 0, beat_length: -50.0 }.multiplier(), 2.0);
    }

    #[test]
    fn segment_duration_overflow() {
        let segment = TempoSegment { start: i64::MIN, end: 1, bpm: 120.0 };
        assert_eq!(segment.duration(), None);

        let segment = TempoSegment { start: 1000, end: 3000, bpm: 120.0 };
        assert_eq!(segment.duration(), Some(2000));
    }
}
