//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Starting Thumbstick");

    let path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let result = thumbstick_app::AppConfig::load_or_default(path.as_deref())
        .map_err(thumbstick_app::AppError::from)
        .and_then(thumbstick_app::App::run);

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("thumbstick: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
