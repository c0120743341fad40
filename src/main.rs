use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match voice_identifier_lib::run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("voice-identifier: {:#}", e);
            ExitCode::from(2)
        }
    }
}
