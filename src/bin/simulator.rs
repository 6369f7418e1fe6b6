use chrono::Utc;
use predict_core::{PredictionRequest, PredictorEngine, ScoringConfig};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One record of a word-frequency import file (already stop-word-filtered
/// by the exporting side).
#[derive(Deserialize)]
struct ImportRecord {
    word: String,
    frequency: u64,
}

fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("aac-word-predict");
    path
}

/// Stdin/stdout bridge for a host UI process. Protocol, one command per
/// line:
///   PREDICT <current text>   -> WHEEL_INNER / WHEEL_OUTER / CHIP lines
///   RECORD <word> [word...]  -> OK
///   IMPORT <json path>       -> IMPORTED <n>
///   EXIT                     -> saves and quits
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    info!("prediction engine starting");

    let config = ScoringConfig::load_or_default(&config_dir().join("scoring.json"));
    let engine = PredictorEngine::from_file_or_new(&config_dir().join("dictionary.bin"), config);
    let recorder = engine.recorder();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        let (command, rest) = match input.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest),
            None => (input.as_str(), ""),
        };

        match command {
            "PREDICT" => {
                let request = PredictionRequest::new(rest);
                let now = Utc::now();
                let wheel = engine.wheel_predictions(&request, now);
                let chips = engine.chip_suggestions(&request, now);

                writeln!(stdout, "WHEEL_INNER {}", wheel.inner.join(" "))?;
                writeln!(stdout, "WHEEL_OUTER {}", wheel.outer.join(" "))?;
                for chip in &chips {
                    writeln!(stdout, "CHIP {}", chip)?;
                }
                writeln!(stdout, "DONE")?;
            }
            "RECORD" => {
                recorder.record_utterance(rest, Utc::now());
                writeln!(stdout, "OK")?;
            }
            "IMPORT" => {
                match read_import_file(Path::new(rest)) {
                    Ok(pairs) => {
                        let applied = engine.import_words(pairs);
                        writeln!(stdout, "IMPORTED {}", applied)?;
                    }
                    Err(e) => {
                        warn!(path = rest, error = %e, "import file unreadable");
                        writeln!(stdout, "IMPORT_FAILED")?;
                    }
                }
            }
            "EXIT" => {
                info!("received EXIT, saving dictionary");
                if let Err(e) = engine.save() {
                    warn!(error = %e, "save on exit failed");
                }
                break;
            }
            _ => {
                warn!(command, "unknown command");
                writeln!(stdout, "ERR unknown command")?;
            }
        }
        stdout.flush()?;
    }

    info!("shutting down");
    Ok(())
}

fn read_import_file(path: &Path) -> Result<Vec<(String, u64)>, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<ImportRecord> = serde_json::from_reader(reader)?;
    Ok(records
        .into_iter()
        .map(|r| (r.word, r.frequency))
        .collect())
}
