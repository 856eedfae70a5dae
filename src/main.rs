use std::process::ExitCode;

fn main() -> ExitCode {
    match ucr_clearance::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
