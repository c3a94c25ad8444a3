use crate::output::Painter;
use crate::types::OutputFormat;
use anyhow::Result;
use cclog_runtime::{Config, SessionService};
use serde::Serialize;
use std::io::Write;

/// Everything a handler needs: the service, user defaults and output settings.
pub struct HandlerContext {
    pub service: SessionService,
    pub config: Config,
    pub format: OutputFormat,
    pub color: bool,
}

impl HandlerContext {
    pub fn painter(&self) -> Painter {
        Painter::new(self.color)
    }

    /// Print `value` as pretty JSON, or as the lines `plain` renders.
    pub fn emit<T: Serialize>(
        &self,
        value: &T,
        plain: impl FnOnce(&T, Painter) -> Vec<String>,
    ) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, value)?;
                writeln!(out)?;
            }
            OutputFormat::Plain => {
                for line in plain(value, self.painter()) {
                    writeln!(out, "{}", line)?;
                }
            }
        }
        Ok(())
    }
}
