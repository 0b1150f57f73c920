use std::io::Write;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{PlotError, Result};

/// Shows a rendered chart to the user.
pub trait ChartViewer {
    /// Displays the given SVG document.
    fn show(&self, svg: &str) -> Result<()>;
}

/// Opens charts with the desktop's default image viewer, or with a
/// configured command.
#[derive(Debug, Clone, Default)]
pub struct SystemViewer {
    command: Option<String>,
}

impl SystemViewer {
    /// Creates a viewer. `command` is split on whitespace and receives the
    /// chart path as its last argument; `None` selects the platform opener.
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    fn launcher(&self) -> (String, Vec<String>) {
        if let Some(command) = &self.command {
            let mut parts = command.split_whitespace().map(str::to_string);
            if let Some(program) = parts.next() {
                return (program, parts.collect());
            }
        }
        let (program, args) = platform_opener();
        (
            program.to_string(),
            args.iter().map(|arg| arg.to_string()).collect(),
        )
    }

    fn launch(&self, path: &Path) -> Result<()> {
        let (program, args) = self.launcher();
        debug!(%program, ?args, path = %path.display(), "launching chart viewer");
        let status = Command::new(&program)
            .args(&args)
            .arg(path)
            .status()
            .map_err(|err| PlotError::Viewer {
                viewer: program.clone(),
                reason: err.to_string(),
            })?;
        if !status.success() {
            return Err(PlotError::Viewer {
                viewer: program,
                reason: format!("exited with {status}"),
            });
        }
        Ok(())
    }
}

impl ChartViewer for SystemViewer {
    fn show(&self, svg: &str) -> Result<()> {
        let mut file = tempfile::Builder::new()
            .prefix("benchplot-")
            .suffix(".svg")
            .tempfile()?;
        file.write_all(svg.as_bytes())?;
        file.flush()?;
        // The viewer may outlive this process, so the file is kept.
        let (_, path) = file.keep().map_err(|err| PlotError::Io(err.error))?;
        self.launch(&path)
    }
}

fn platform_opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(windows) {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}
