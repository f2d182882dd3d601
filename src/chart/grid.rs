//! Grid placement of instrument charts.

use serde::Serialize;

use super::composer::InstrumentChart;
use crate::error::DashboardError;

/// One grid slot: a titled chart, or the reason it could not be produced
#[derive(Debug, Clone, Serialize)]
pub struct GridCell {
    pub title: String,
    pub row: usize,
    pub column: usize,
    #[serde(serialize_with = "serialize_outcome")]
    pub outcome: Result<InstrumentChart, DashboardError>,
}

impl GridCell {
    pub fn chart(&self) -> Option<&InstrumentChart> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&DashboardError> {
        self.outcome.as_ref().err()
    }
}

fn serialize_outcome<S>(outcome: &Result<InstrumentChart, DashboardError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    #[derive(Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Outcome<'a> {
        Chart(&'a InstrumentChart),
        Error(String),
    }

    match outcome {
        Ok(chart) => Outcome::Chart(chart).serialize(serializer),
        Err(e) => Outcome::Error(e.to_string()).serialize(serializer),
    }
}

/// Row-major arrangement of cells over a fixed number of columns
#[derive(Debug, Clone, Serialize)]
pub struct ChartGrid {
    columns: usize,
    cells: Vec<GridCell>,
}

impl ChartGrid {
    /// Place `(title, outcome)` pairs in input order. `columns` must be positive.
    pub fn arrange(
        entries: Vec<(String, Result<InstrumentChart, DashboardError>)>,
        columns: usize,
    ) -> Result<Self, DashboardError> {
        if columns == 0 {
            return Err(DashboardError::invalid_params("grid needs at least one column"));
        }

        let cells = entries
            .into_iter()
            .enumerate()
            .map(|(i, (title, outcome))| GridCell {
                title,
                row: i / columns,
                column: i % columns,
                outcome,
            })
            .collect();

        Ok(Self { columns, cells })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.cells.len().div_ceil(self.columns)
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[GridCell] {
        let start = (row * self.columns).min(self.cells.len());
        let end = (start + self.columns).min(self.cells.len());
        &self.cells[start..end]
    }

    pub fn failures(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(|c| c.outcome.is_err())
    }
}

/// `"{name} ({code})"`
pub fn cell_title(name: &str, code: &str) -> String {
    format!("{} ({})", name, code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::composer::build_layout;
    use crate::chart::figure::Figure;

    fn chart(symbol: &str) -> InstrumentChart {
        InstrumentChart {
            symbol: symbol.to_string(),
            figure: Figure {
                data: vec![],
                layout: build_layout(0.0),
            },
            last_price: 1.0,
            last_volume: 0.0,
            price_range: (0.0, 1.0),
        }
    }

    fn entries(n: usize) -> Vec<(String, Result<InstrumentChart, DashboardError>)> {
        (0..n)
            .map(|i| {
                let code = format!("S{}", i);
                (cell_title("Stock", &code), Ok(chart(&code)))
            })
            .collect()
    }

    #[test]
    fn test_five_items_over_two_columns() {
        let grid = ChartGrid::arrange(entries(5), 2).unwrap();

        let positions: Vec<(usize, usize)> = grid.cells().iter().map(|c| (c.row, c.column)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.row(2).len(), 1);
        assert!(grid.row(5).is_empty());
    }

    #[test]
    fn test_zero_columns_rejected() {
        let err = ChartGrid::arrange(entries(1), 0).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidParams(_)));
    }

    #[test]
    fn test_failure_isolated_to_its_cell() {
        let mut items = entries(3);
        items[1].1 = Err(DashboardError::unavailable("S1", "no data"));

        let grid = ChartGrid::arrange(items, 4).unwrap();

        assert!(grid.cells()[0].chart().is_some());
        assert!(grid.cells()[1].error().unwrap().is_unavailable());
        assert!(grid.cells()[2].chart().is_some());
        assert_eq!(grid.failures().count(), 1);
    }

    #[test]
    fn test_cell_title_format() {
        assert_eq!(cell_title("Apple", "AAPL"), "Apple (AAPL)");
    }

    #[test]
    fn test_empty_grid() {
        let grid = ChartGrid::arrange(vec![], 3).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.row_count(), 0);
    }

    #[test]
    fn test_serialized_failure_carries_message() {
        let items = vec![("Dead (X)".to_string(), Err(DashboardError::unavailable("X", "delisted")))];
        let grid = ChartGrid::arrange(items, 1).unwrap();

        let json = serde_json::to_value(&grid).unwrap();
        let message = json["cells"][0]["outcome"]["error"].as_str().unwrap();
        assert!(message.contains("delisted"));
    }
}
