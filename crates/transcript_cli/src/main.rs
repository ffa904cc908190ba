//! CLI smoke entry point and offline transcript printer.
//!
//! # Responsibility
//! - Verify `transcript_core` linkage with deterministic output.
//! - Build one transcript from a JSON file of grade entries.
//!
//! Usage: `transcript_cli [<grades.json> <nim>]`
//!
//! Environment:
//! - `TRANSCRIPT_LOG_DIR`: absolute directory for rolling logs (optional).
//! - `TRANSCRIPT_POLICY_PATH`: grading policy JSON file (optional).

use log::info;
use std::path::Path;
use std::process::ExitCode;
use transcript_core::{
    default_log_level, init_logging, GradeRecord, GradeService, GradingPolicy,
    InMemoryAuditLog, InMemoryGradeRepository,
};

fn main() -> ExitCode {
    println!("transcript_core ping={}", transcript_core::ping());
    println!("transcript_core version={}", transcript_core::core_version());

    if let Some(dir) = env_value("TRANSCRIPT_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => ExitCode::SUCCESS,
        [grades_path, nim] => match print_transcript(Path::new(grades_path), nim) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("usage: transcript_cli [<grades.json> <nim>]");
            ExitCode::from(2)
        }
    }
}

fn print_transcript(grades_path: &Path, nim: &str) -> Result<(), Box<dyn std::error::Error>> {
    let policy = match env_value("TRANSCRIPT_POLICY_PATH") {
        Some(path) => GradingPolicy::load(Path::new(&path))?,
        None => GradingPolicy::default(),
    };

    let raw = std::fs::read_to_string(grades_path)?;
    let entries: Vec<GradeRecord> = serde_json::from_str(&raw)?;

    let mut service = GradeService::new(
        InMemoryGradeRepository::new(),
        InMemoryAuditLog::new(),
        policy,
    );
    let total = entries.len();
    let mut accepted = 0usize;
    for (index, entry) in entries.into_iter().enumerate() {
        let label = format!("{}/{}", entry.student_id, entry.course_code);
        match service.submit_grade(entry) {
            Ok(_) => accepted += 1,
            Err(err) => eprintln!("skipped entry #{index} ({label}): {err}"),
        }
    }
    info!("event=cli_load module=cli status=ok accepted={accepted} total={total}");

    let transcript = service.build_transcript(nim);
    println!("{}", serde_json::to_string_pretty(&transcript)?);
    Ok(())
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}
