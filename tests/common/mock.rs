//! In-memory adapters standing in for the JSON files.
#![allow(dead_code)]

use anyhow::Result;
use netdto_lint::domain::ports::DeclarationSource;
use netdto_lint::domain::types::DeclarationData;
use std::cell::Cell;

/// Declaration source returning a fixed document and counting loads.
pub struct MockDeclarationSource {
    pub data: DeclarationData,
    pub loads: Cell<usize>,
}

impl MockDeclarationSource {
    pub fn new(data: DeclarationData) -> Self {
        Self {
            data,
            loads: Cell::new(0),
        }
    }
}

impl DeclarationSource for MockDeclarationSource {
    fn load(&self) -> Result<DeclarationData> {
        self.loads.set(self.loads.get() + 1);
        Ok(self.data.clone())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
