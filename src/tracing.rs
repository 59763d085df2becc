use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Log sink shared by every writer the subscriber hands out.
#[derive(Clone)]
struct SharedWriter {
    file: Arc<RwLock<Option<File>>>,
}

/// Tees each record to stderr and, when set, the log file.
struct MultiWriter {
    file: Arc<RwLock<Option<File>>>,
}

impl SharedWriter {
    fn new() -> Self {
        Self {
            file: Arc::new(RwLock::new(None)),
        }
    }

    fn set_file(&self, file: Option<File>) {
        *self.file.write().unwrap_or_else(PoisonError::into_inner) = file;
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedWriter {
    type Writer = MultiWriter;

    fn make_writer(&'a self) -> Self::Writer {
        MultiWriter {
            file: self.file.clone(),
        }
    }
}

impl Write for MultiWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = io::stderr().write(buf)?;
        if let Some(file) = &mut *self.file.write().unwrap_or_else(PoisonError::into_inner) {
            let _ = file.write_all(buf);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = &mut *self.file.write().unwrap_or_else(PoisonError::into_inner) {
            let _ = file.flush();
        }
        Ok(())
    }
}

static WRITER: OnceLock<SharedWriter> = OnceLock::new();

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber. `log` records are bridged into it and the
/// filter comes from `RUST_LOG`, defaulting to `info`.
///
/// Calling it again only swaps the log file.
pub fn init(log_file: Option<&Path>) {
    let writer = WRITER.get_or_init(|| {
        let _ = tracing_log::LogTracer::init();

        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        let writer = SharedWriter::new();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(writer.clone())
            .try_init();
        writer
    });

    match log_file.map(open_log_file) {
        Some(Ok(file)) => writer.set_file(Some(file)),
        Some(Err(err)) => {
            writer.set_file(None);
            ::tracing::warn!(error = %err, "could not open log file, logging to stderr only");
        }
        None => writer.set_file(None),
    }
}
