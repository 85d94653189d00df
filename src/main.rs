use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;

use overmark::cli::CliArgs;
use overmark::config::WidgetConfig;
use overmark::widget::{MarkupBuffer, TextDoc};

fn main() -> Result<()> {
    overmark::tracing::init();

    let args = CliArgs::parse();
    let config = WidgetConfig::load();

    let text = match &args.path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    if let Some(color) = &args.color {
        overmark::theme::Color::from_hex(color)
            .map_err(|e| anyhow::anyhow!("Invalid --color {}: {}", color, e))?;
    }
    let default_color = args.color.as_deref().unwrap_or(&config.default_color);

    let mut doc = TextDoc::with_text(MarkupBuffer::new(), &text);
    doc.set_font(args.resolve_font(config.font.clone()));

    for spec in &args.highlights {
        let color = spec.color.as_deref().unwrap_or(default_color);
        doc.add_highlight(spec.start, spec.end, Some(color))
            .with_context(|| format!("Failed to add highlight {}..{}", spec.start, spec.end))?;
    }
    doc.refresh();

    print!("{}", doc.sink().markup());
    Ok(())
}
