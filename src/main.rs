use clap::Parser;
use std::path::PathBuf;
use tabmate::controller::Controller;
use tabmate::keywords::PYTHON_KEYWORDS;
use tabmate::EditBuffer;

/// A small terminal editor with lexical word completion: suggestions come
/// from the identifiers already in the document plus the language's
/// reserved keywords.
#[derive(Parser)]
#[command(name = "tabmate", version, about)]
struct Args {
    /// File to edit; a new buffer is opened when omitted or missing.
    file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let buffer = match args.file {
        Some(path) if path.exists() => EditBuffer::from_file(path)?,
        Some(path) => {
            let mut buffer = EditBuffer::new();
            buffer.filename = Some(path);
            buffer
        }
        None => EditBuffer::new(),
    };

    let mut controller = Controller::new(buffer, PYTHON_KEYWORDS);
    controller.run()?;
    Ok(())
}
