use chrono::Utc;
use crossterm::style::Stylize;
use predict_core::{PredictionRequest, PredictorEngine, ScoringConfig};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;

fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("aac-word-predict");
    path
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ScoringConfig::load_or_default(&config_dir().join("scoring.json"));
    let engine = PredictorEngine::from_file_or_new(&config_dir().join("dictionary.bin"), config);
    let recorder = engine.recorder();
    let mut utterance = String::new();

    println!("AAC Word Predictor. Type to compose; 'exit' to save and quit.");
    println!("---------------------------------------------------------------");

    loop {
        let now = Utc::now();
        let request = PredictionRequest::new(utterance.clone());
        let wheel = engine.wheel_predictions(&request, now);
        let chips = engine.chip_suggestions(&request, now);
        print_ui(&utterance, &wheel, &chips);

        let mut input = String::new();
        if stdin().read_line(&mut input).is_err() {
            break;
        }
        let cmd = input.trim();

        match cmd {
            "exit" => break,
            "" => {
                // Enter key - speak the utterance and record every word
                if !utterance.is_empty() {
                    println!("\nSpeaking: '{}'", utterance.clone().green());
                    recorder.record_utterance(&utterance, Utc::now());
                    utterance.clear();
                }
            }
            s if s.starts_with(':') && s.len() > 1 => {
                // Select chip :1..:8 - replaces the in-progress token
                if let Ok(n) = s[1..].parse::<usize>() {
                    if n > 0 && n <= chips.len() {
                        let chosen = chips[n - 1].clone();
                        accept_completion(&mut utterance, &chosen);
                        recorder.record(&chosen, Utc::now());
                    }
                }
            }
            s => {
                if !utterance.is_empty() {
                    utterance.push(' ');
                }
                utterance.push_str(s);
            }
        }
    }

    println!("\nSaving dictionary...");
    if let Err(e) = engine.save() {
        eprintln!("[ERROR] Could not save dictionary: {}", e);
    } else {
        println!("Dictionary saved ({} words)", engine.word_count());
    }
}

/// Replaces the trailing in-progress token with the chosen completion.
fn accept_completion(utterance: &mut String, chosen: &str) {
    if let Some(idx) = utterance.rfind(char::is_whitespace) {
        utterance.truncate(idx + 1);
    } else {
        utterance.clear();
    }
    utterance.push_str(chosen);
}

fn print_ui(utterance: &str, wheel: &predict_core::WordWheel, chips: &[String]) {
    // Basic clear screen for simplicity
    print!("\x1B[2J\x1B[1;1H");
    println!("{}", "AAC Word Predictor".bold());
    println!("---------------------------------------------------------------");
    println!("Type words, [Enter] to speak, ':1'..':8' to take a chip, 'exit' to quit.\n");

    println!("Utterance: [{}]", utterance);

    println!("\nWord wheel:");
    println!("  inner: {}", wheel.inner.join("  ").cyan());
    println!("  outer: {}", wheel.outer.join("  ").dark_cyan());

    if chips.is_empty() {
        println!("\nNo suggestions found.");
    } else {
        println!("\nSuggestion chips:");
        for (i, word) in chips.iter().enumerate() {
            println!("  :{}: {}", i + 1, word.clone().yellow());
        }
    }
    print!("\n> ");
    let _ = stdout().flush();
}
