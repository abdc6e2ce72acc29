use std::process::ExitCode;

fn main() -> ExitCode {
    match vocsheet_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            vocsheet_cli::report_error(&err);
            ExitCode::FAILURE
        }
    }
}
