//! Consumed capacity accounting.

use indexmap::IndexMap;

/// Read and write capacity consumed against one table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TableUnits {
    /// Read capacity units.
    pub read: f64,
    /// Write capacity units.
    pub write: f64,
}

/// Capacity units consumed by a connection, in total and per table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsumedUnits {
    total: TableUnits,
    tables: IndexMap<String, TableUnits>,
}

impl ConsumedUnits {
    /// Record read units consumed against `table`.
    pub fn add_read(&mut self, table: &str, units: f64) {
        self.total.read += units;
        self.table_mut(table).read += units;
    }

    /// Record write units consumed against `table`.
    pub fn add_write(&mut self, table: &str, units: f64) {
        self.total.write += units;
        self.table_mut(table).write += units;
    }

    /// Total read units.
    #[must_use]
    pub fn read(&self) -> f64 {
        self.total.read
    }

    /// Total write units.
    #[must_use]
    pub fn write(&self) -> f64 {
        self.total.write
    }

    /// Units consumed against `table`.
    #[must_use]
    pub fn table(&self, table: &str) -> Option<TableUnits> {
        self.tables.get(table).copied()
    }

    /// Per-table units, in first-use order.
    pub fn tables(&self) -> impl Iterator<Item = (&str, TableUnits)> {
        self.tables.iter().map(|(name, units)| (name.as_str(), *units))
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        self.total = TableUnits::default();
        self.tables.clear();
    }

    fn table_mut(&mut self, table: &str) -> &mut TableUnits {
        self.tables.entry(table.to_owned()).or_default()
    }
}
