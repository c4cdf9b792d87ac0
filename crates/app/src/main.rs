mod agent_mode;

use std::process::ExitCode;

use simulation::level::Level;

const USAGE: &str =
    "usage: busjam --agent <level.json>...\n       busjam --validate <level.json>...";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [flag, paths @ ..] if flag == "--agent" && !paths.is_empty() => {
            let mut levels = Vec::with_capacity(paths.len());
            for path in paths {
                match load_level(path) {
                    Ok(level) => levels.push(level),
                    Err(message) => {
                        eprintln!("{message}");
                        return ExitCode::FAILURE;
                    }
                }
            }
            match agent_mode::run_agent_mode(levels) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("agent mode I/O error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        [flag, paths @ ..] if flag == "--validate" && !paths.is_empty() => {
            let mut failed = false;
            for path in paths {
                match load_level(path) {
                    Ok(level) => println!(
                        "{}: ok ({}x{}, {} passengers, {} vehicles, bench {}, {}s)",
                        level.name(),
                        level.width(),
                        level.height(),
                        level.passengers().len(),
                        level.vehicles().len(),
                        level.bench_capacity(),
                        level.time_limit()
                    ),
                    Err(message) => {
                        eprintln!("{message}");
                        failed = true;
                    }
                }
            }
            if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        _ => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn load_level(path: &str) -> Result<Level, String> {
    let json =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    Level::from_json(&json).map_err(|e| format!("{path}: {e}"))
}
