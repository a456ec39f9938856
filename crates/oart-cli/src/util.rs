use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use anyhow::Context;
use oart_core::PassEvent;
use oart_evaluator::{
    batch::{self, ScoredPass},
    event_evaluator::OartScorer,
    oracle::OracleBuilder,
};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read pass events from a JSON array file
pub fn read_events_file<P>(path: P) -> anyhow::Result<Vec<PassEvent>>
where
    P: AsRef<Path>,
{
    read_json_file("pass events", path)
}

/// Options shared by every command that scores passes.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoringArg {
    /// Logistic model artifact (JSON)
    #[arg(long)]
    pub model: PathBuf,
    /// Number of scoring threads [default: available parallelism]
    #[arg(long)]
    pub workers: Option<NonZeroUsize>,
    /// Pass events file (JSON array)
    pub events: PathBuf,
}

/// Score every pass in the events file
///
/// Passes missing a required location are logged and skipped so the rest of the batch
/// completes.
///
/// # Errors
///
/// Returns error if the model or the events file cannot be loaded
pub(crate) fn score_events(arg: &ScoringArg) -> anyhow::Result<Vec<ScoredPass>> {
    let oracle = OracleBuilder::new()
        .model_path(&arg.model)
        .build()
        .with_context(|| format!("Failed to load model: {}", arg.model.display()))?;
    tracing::info!(model = oracle.name(), "model loaded");

    let passes = read_events_file(&arg.events)?;
    tracing::info!(passes = passes.len(), "scoring passes");

    let scorer = OartScorer::new(Box::new(oracle));
    let workers = arg.workers.unwrap_or_else(batch::default_workers);
    let results = batch::score_batch(&scorer, &passes, workers);

    let mut scored = Vec::with_capacity(passes.len());
    for (index, (pass, result)) in passes.iter().zip(results).enumerate() {
        match result {
            Ok(result) => scored.push(ScoredPass::new(pass, result)),
            Err(error) => tracing::warn!(index, pass = ?pass.id, %error, "skipping pass"),
        }
    }

    let defined = scored.iter().filter(|row| row.result.is_defined()).count();
    tracing::info!(
        scored = scored.len(),
        defined,
        undefined = scored.len() - defined,
        skipped = passes.len() - scored.len(),
        "scoring done"
    );
    Ok(scored)
}
