//! Command and modifier description tables.
//!
//! Process-wide read-only state: const slices are the source of truth, the
//! lookup maps are built once on first use and never mutated. The modifier
//! table is advisory metadata for callers; the parse path never consults it.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Description sentinel for commands absent from the table.
pub const UNKNOWN_COMMAND: &str = "Unknown command";

pub(crate) const COMMANDS: &[(&str, &str)] = &[
    ("ID", "Device ID"),
    ("B", "Baudrate"),
    ("D", "Position in Degrees"),
    ("DT", "Position in Degrees"),
    ("MD", "Move in Degrees"),
    ("WD", "Wheel mode in Degrees"),
    ("VT", "Wheel mode in Degrees"),
    ("WR", "Wheel mode in RPM"),
    ("P", "Position in PWM"),
    ("M", "Move in PWM (relative)"),
    ("RDM", "Raw Duty-Cycle Move"),
    ("Q", "Query Status"),
    ("L", "Limp"),
    ("H", "Halt & Hold"),
    ("EM", "Enable Motion Profile"),
    ("FPC", "Filter Position Count"),
    ("O", "Origin Offset"),
    ("AR", "Angular Range"),
    ("AS", "Angular Stiffness"),
    ("AH", "Angular Holding Stiffness"),
    ("AA", "Angular Acceleration"),
    ("AD", "Angular Deceleration"),
    ("G", "Gyre Direction"),
    ("FD", "First Position"),
    ("MMD", "Maximum Motor Duty"),
    ("S", "Query Speed"),
    ("SD", "Maximum Speed in Degrees"),
    ("SR", "Maximum Speed in RPM"),
    ("V", "Voltage"),
    ("T", "Temperature"),
    ("C", "Current (Amps)"),
    ("LED", "LED Color"),
    ("LB", "LED Blinking"),
    ("MS", "Model String"),
    ("F", "Firmware"),
    ("N", "Serial Number"),
];

const MODIFIERS: &[(&str, &str)] = &[
    ("S", "Speed"),
    ("SD", "Speed in Degrees"),
    ("T", "Timed Move"),
    ("CH", "Current Hold"),
    ("CL", "Current Limp"),
];

fn command_map() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| COMMANDS.iter().copied().collect())
}

fn modifier_map() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| MODIFIERS.iter().copied().collect())
}

/// Look up the description of a normalized (uppercase) command code.
pub fn describe_command(command: &str) -> Option<&'static str> {
    command_map().get(command).copied()
}

/// Advisory description of a command modifier suffix code.
pub fn modifier_description(code: &str) -> Option<&'static str> {
    modifier_map().get(code).copied()
}

#[cfg(test)]
mod tests {
    use super::{COMMANDS, describe_command, modifier_description};

    #[test]
    fn table_has_no_duplicate_codes() {
        let mut codes: Vec<&str> = COMMANDS.iter().map(|(code, _)| *code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), COMMANDS.len());
    }

    #[test]
    fn describe_known_and_unknown() {
        assert_eq!(describe_command("MS"), Some("Model String"));
        assert_eq!(describe_command("Q"), Some("Query Status"));
        // deliberate spelling fix over the vendor table ("Andular")
        assert_eq!(describe_command("AD"), Some("Angular Deceleration"));
        assert_eq!(describe_command("ZZ"), None);
        // lookups are case-sensitive after normalization
        assert_eq!(describe_command("ms"), None);
    }

    #[test]
    fn modifier_metadata_resolves() {
        assert_eq!(modifier_description("CH"), Some("Current Hold"));
        assert_eq!(modifier_description("X"), None);
    }
}
