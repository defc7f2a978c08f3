use crate::changelog::report::{Changelog, RenderedDocument};
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where the reporter sends a changelog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputOptions {
    /// Emit GitHub Actions workflow commands instead of plain console text.
    pub annotations: bool,
    pub output_dir: Option<PathBuf>,
}

pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        tracing::warn!("failed to write to stdout: {e}");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}

/// Escapes a workflow command message.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a workflow command property value.
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Formats a GitHub Actions workflow command such as `::notice title=...::message`.
pub fn workflow_command(command: &str, title: &str, message: &str) -> String {
    format!(
        "::{command} title={}::{}",
        escape_property(title),
        escape_data(message)
    )
}

/// Writes each document to its own file under `dir`, creating `dir` if needed.
pub fn write_documents(dir: &Path, documents: &[RenderedDocument]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    documents
        .iter()
        .map(|document| -> Result<PathBuf> {
            let path = dir.join(document.file_name());
            fs::write(&path, &document.content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote changelog file");
            Ok(path)
        })
        .collect()
}

/// Emits the rendered documents and the warning block.
pub fn report(
    changelog: &Changelog,
    options: &OutputOptions,
    writer: &mut Option<&mut dyn Write>,
) -> Result<()> {
    if let Some(dir) = &options.output_dir {
        write_documents(dir, &changelog.documents)?;
    }

    for document in &changelog.documents {
        if options.annotations {
            println(
                &workflow_command("notice", document.title(), &document.content),
                writer,
            )?;
        } else {
            println(&format!("{}:", document.title()), writer)?;
            println(&document.content, writer)?;
        }
    }

    if let Some(warnings) = &changelog.warnings {
        tracing::warn!("some issues are not closed or not categorized");
        if options.annotations {
            println(&workflow_command("warning", "Warnings", warnings), writer)?;
        } else {
            println("Warnings:", writer)?;
            println(warnings, writer)?;
        }
    }

    Ok(())
}
