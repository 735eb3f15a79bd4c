use towercfg_core::{events, init_logging};

mod app;
mod commands;
mod host;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Quiet unless -v is given
    let quiet = !matches.get_flag("verbose");
    init_logging(quiet);

    if let Err(e) = commands::run_command(&matches) {
        events::log_app_error(e.as_ref());
        return Err(e);
    }

    Ok(())
}
