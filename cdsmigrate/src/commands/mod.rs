//! Commands module - CLI subcommand implementations.

mod fix;
mod registry;
mod remediate;
mod scan;
mod utils;

// Re-export all public items
pub use fix::{run_fix, FixOptions};
pub use registry::run_registry;
pub use remediate::{parse_units, run_remediate};
pub use scan::{run_scan, ScanOptions};
pub use utils::{read_input, write_output};
