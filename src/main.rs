use anyhow::{Result, bail};
use clap::Parser;
use log::{debug, info};
use sv_normalizer::{
    Args, NormalizeOptions, format_tempo_record, normalize_file, prompt_for_path_stdin,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let opts = NormalizeOptions::from(&args);

    let path = match args.beatmap.clone() {
        Some(path) => path,
        None => prompt_for_path_stdin()?,
    };

    if !path.is_file() {
        bail!("Beatmap '{}' does not exist..!", path.display());
    }

    info!("Normalizing SV for '{}'...", path.display());
    debug!("Options: {:?}", opts);

    let report = normalize_file(&path, args.output.clone(), &opts)?;

    if report.written {
        info!("Wrote adjusted beatmap: {}", report.output.display());
    } else {
        info!(
            "Dry run, would have written {} timing record(s) to {}",
            report.timing.tempo.len() + report.timing.sv.len(),
            report.output.display()
        );
        for point in &report.timing.tempo {
            debug!("{}", format_tempo_record(point));
        }
    }

    Ok(())
}
