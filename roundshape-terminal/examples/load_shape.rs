/// Example: Load and render a `.shape` file in the terminal
/// 
/// Usage: cargo run --example load_shape -- path/to/file.shape

use std::env;
use std::fs;
use std::io;
use roundshape_core::format;
use roundshape_core::Preset;
use roundshape_terminal::{logger, TerminalApp};

fn main() -> io::Result<()> {
    logger::init_from_env()?;

    let args: Vec<String> = env::args().collect();
    
    if args.len() < 2 {
        eprintln!("Usage: {} <shape-file>", args[0]);
        eprintln!("\nNo shape file provided, using default kite...");
        let mut app = TerminalApp::new(Preset::from_name("kite").unwrap_or_default())?;
        return app.run();
    }

    let shape_path = &args[1];
    
    println!("Loading shape file: {}", shape_path);
    
    let text = fs::read_to_string(shape_path)
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, format!("Failed to read shape file: {}", e)))?;
    
    let (name, spec) = format::parse_shape(&text)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse shape: {}", e)))?;

    // Reject shapes the tessellator cannot handle before entering raw mode
    spec.tessellate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid shape: {}", e)))?;
    
    println!("Loaded {} ({} anchors)", name.as_deref().unwrap_or("unnamed shape"), spec.anchors.len());
    std::thread::sleep(std::time::Duration::from_secs(1));
    
    let mut app = TerminalApp::from_spec(spec)?;
    app.run()?;
    
    Ok(())
}
