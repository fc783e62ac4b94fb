use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

/// Send tracing output to `path`.
///
/// The terminal belongs to the game while it runs, so logs only ever go to a
/// file. Without a call to this nothing is recorded.
pub fn init_file_logging(path: &Path, level: Level) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install tracing subscriber: {}", err))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritable_log_path() {
        let err = init_file_logging(Path::new("/nonexistent/dir/snake.log"), Level::INFO)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to create log file"));
    }
}
