/// roundshape terminal editor
///
/// Usage: roundshape-terminal [kite|rectangle|regular_polygon|star]
///
/// Controls:
///   - Tab: Next preset
///   - +/-: Corner radius
///   - [/]: Corner smoothness
///   - F/S: Toggle fill / stroke
///   - G, Left/Right: Fill gradient type and angle
///   - Q/ESC: Quit

use std::env;
use std::io;
use roundshape_core::Preset;
use roundshape_terminal::{logger, TerminalApp};

fn main() -> io::Result<()> {
    logger::init_from_env()?;

    let preset = match env::args().nth(1) {
        Some(name) => Preset::from_name(&name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown preset '{}', expected one of {:?}", name, Preset::NAMES),
            )
        })?,
        None => Preset::default(),
    };

    log::info!("starting editor with preset {}", preset.name());

    let mut app = TerminalApp::new(preset)?;
    app.run()?;

    Ok(())
}
