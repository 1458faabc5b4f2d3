/// Result structs for command output. Commands return these instead of printing
/// directly; main.rs formats them as human-readable or JSON based on --json.
mod exec;
mod init;
mod run;
mod steps;

pub use exec::*;
pub use init::*;
pub use run::*;
pub use steps::*;
