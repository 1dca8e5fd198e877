use thiserror::Error;

pub type Result<T> = std::result::Result<T, SvError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SvError {
    /// A required `[Section]` marker was not found in the beatmap.
    #[error("[{0}] section not found..!")]
    MissingSection(&'static str),

    /// A record had a field that could not be parsed. Aborts the whole file.
    #[error("Malformed record `{record}`: {field} {reason}..!")]
    MalformedRecord {
        record: String,
        field: &'static str,
        reason: String,
    },

    /// A span between two timeline positions does not fit in an `i64`.
    #[error("Timeline span {start}ms..{end}ms is too long..!")]
    TimelineOverflow { start: i64, end: i64 },

    #[error("No uninherited timing points, can't pick a dominant BPM..!")]
    NoTempoPoints,

    #[error("Dominant BPM rounded to {0}, can't derive a beat length from it..!")]
    DegenerateTempo(f64),
}

impl SvError {
    pub(crate) fn malformed(record: &str, field: &'static str, reason: impl ToString) -> Self {
        SvError::MalformedRecord {
            record: record.trim().to_string(),
            field,
            reason: reason.to_string(),
        }
    }
}
