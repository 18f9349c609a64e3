//! Process-level plumbing shared by the binaries

use std::io::Write;
use std::path::Path;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::error::Result;

/// Install the stderr logger
///
/// `RUST_LOG` wins over the default level, which is `debug` when `verbose`
/// is set and `info` otherwise.
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| eprintln!("Error initializing the global logger: {err}"))
        .ok();
}

/// Write `contents` to `path` through a temporary sibling file
///
/// The target is replaced by a rename, so a failed run never leaves a
/// partially written file behind.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = Path::new(&tmp_name);

    let written = std::fs::File::create(tmp).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });
    if let Err(err) = written.and_then(|_| std::fs::rename(tmp, path)) {
        let _ = std::fs::remove_file(tmp);
        return Err(err.into());
    }

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("sinatra-gen-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_write_atomic_creates_parents() {
        let dir = scratch_dir("atomic");
        let path = dir.join("nested").join("models.json");

        write_atomic(&path, "{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        assert!(!dir.join("nested").join("models.json.tmp").exists());

        write_atomic(&path, "[]").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_atomic_failure_leaves_no_file() {
        let dir = scratch_dir("atomic-fail");
        std::fs::create_dir_all(&dir).unwrap();
        // a directory in place of the target makes the rename fail
        let path = dir.join("taken");
        std::fs::create_dir_all(path.join("child")).unwrap();

        assert!(write_atomic(&path, "data").is_err());
        assert!(!dir.join("taken.tmp").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
