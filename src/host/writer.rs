use std::io::Write;

use log::warn;

use super::{Host, HostCommand, Registrar};

/// Host that serializes each command as one JSON line.
///
/// Used by the replay binary so a script's effect on the host can be
/// diffed or piped into another tool.
pub struct JsonLinesHost<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesHost<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, value: &serde_json::Value) {
        if let Err(e) = writeln!(self.out, "{}", value) {
            warn!("Failed to write host line: {}", e);
        }
    }
}

impl<W: Write> Host for JsonLinesHost<W> {
    fn execute(&mut self, command: HostCommand) {
        match serde_json::to_value(&command) {
            Ok(value) => self.write_line(&value),
            Err(e) => warn!("Failed to serialize {} command: {}", command.name(), e),
        }
    }
}

impl<W: Write> Registrar for JsonLinesHost<W> {
    fn register(&mut self, name: &str, wrapped: bool) {
        self.write_line(&serde_json::json!({
            "command": "registerComponent",
            "name": name,
            "wrapped": wrapped,
        }));
    }
}
