use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use time::macros::format_description;

const LOG_NAME: &str = "city_query.log";

/// `<dir>/<YYYY-mm-dd_HH-MM-SS>+city_query.log`
pub fn log_file_path(dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    dir.join(format!("{timestamp}+{LOG_NAME}"))
}

/// Route the `log` macros to a fresh file under `dir`. Returns its path.
pub fn init(dir: &Path, level: LevelFilter) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let path = log_file_path(dir);
    let file = fs::File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    WriteLogger::init(
        level,
        ConfigBuilder::new()
            .set_time_format_custom(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))
            .build(),
        file,
    )
    .context("failed to initialise file logger")?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lands_in_directory_with_timestamp_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_file_path(dir.path());

        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with("+city_query.log"), "{name}");
        assert_eq!(name.len(), "2026-01-01_00-00-00+city_query.log".len());
    }
}
