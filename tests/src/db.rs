use crate::Setup;

use cqlmap_driver_memory::Memory;

/// Rows come back keyed by column name.
pub struct SetupNamed;

/// Rows come back as bare values, ordered like the projection.
pub struct SetupPositional;

impl Setup for SetupNamed {
    fn executor(&self) -> Memory {
        Memory::new()
    }

    fn name(&self) -> &'static str {
        "named"
    }
}

impl Setup for SetupPositional {
    fn executor(&self) -> Memory {
        Memory::positional()
    }

    fn name(&self) -> &'static str {
        "positional"
    }
}
