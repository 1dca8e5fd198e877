use anyhow::{Result, anyhow, bail};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// `maps/song.osu` + `_adjusted` -> `maps/song_adjusted.osu`.
pub fn adjusted_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };

    input.with_file_name(name)
}

/// Strips whitespace and the quotes a file manager adds when dragging a path into a terminal.
pub fn clean_path_input(input: &str) -> PathBuf {
    PathBuf::from(input.trim().trim_matches('"'))
}

pub fn prompt_for_path<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<PathBuf> {
    write!(output, "Path to the .osu file: ")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| anyhow!("Failed to read a path from stdin: {}", e))?;

    let path = clean_path_input(&line);
    if path.as_os_str().is_empty() {
        bail!("No beatmap path given..!");
    }

    Ok(path)
}

pub fn prompt_for_path_stdin() -> Result<PathBuf> {
    prompt_for_path(io::stdin().lock(), io::stdout())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn adjusted_path_keeps_folder_and_extension() {
        assert_eq!(
            adjusted_path(Path::new("maps/Artist - Song (mapper) [Hard].osu"), "_adjusted"),
            PathBuf::from("maps/Artist - Song (mapper) [Hard]_adjusted.osu")
        );
        assert_eq!(
            adjusted_path(Path::new("my.osu.backup/map.osu"), "_sv"),
            PathBuf::from("my.osu.backup/map_sv.osu")
        );
        assert_eq!(
            adjusted_path(Path::new("map"), "_adjusted"),
            PathBuf::from("map_adjusted")
        );
    }

    #[test]
    fn quoted_paths_are_cleaned() {
        assert_eq!(
            clean_path_input("  \"C:\\Songs\\map.osu\"\r\n"),
            PathBuf::from("C:\\Songs\\map.osu")
        );
        assert_eq!(clean_path_input("map.osu\n"), PathBuf::from("map.osu"));
    }

    #[test]
    fn prompt_reads_one_line() {
        let mut prompt = Vec::new();
        let path = prompt_for_path("\"song.osu\"\nignored\n".as_bytes(), &mut prompt).unwrap();

        assert_eq!(path, PathBuf::from("song.osu"));
        assert!(String::from_utf8(prompt).unwrap().starts_with("Path to"));
    }

    #[test]
    fn prompt_rejects_empty_input() {
        assert!(prompt_for_path("\n".as_bytes(), Vec::new()).is_err());
    }
}
