use super::{Host, HostCommand, Registrar};

/// Host that keeps every command in memory. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub commands: Vec<HostCommand>,
    /// `(name, wrapped)` pairs in registration order.
    pub registrations: Vec<(String, bool)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded commands and clears the log.
    pub fn take(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn last(&self) -> Option<&HostCommand> {
        self.commands.last()
    }
}

impl Host for RecordingHost {
    fn execute(&mut self, command: HostCommand) {
        self.commands.push(command);
    }
}

impl Registrar for RecordingHost {
    fn register(&mut self, name: &str, wrapped: bool) {
        self.registrations.push((name.to_string(), wrapped));
    }
}
