use mars_core::{TableGrid, TableSource};

use super::utils::escape_html;
use crate::config::ScrapeConfig;
use crate::logging::Logger;

/// Column labels applied to the facts table, row key first.
pub const FACTS_COLUMNS: [&str; 2] = ["description", "Mars"];

/// CSS classes added to the rendered table.
pub const FACTS_CLASSES: &str = "table table-hover";

/// The facts table keyed by its first column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactsTable {
    rows: Vec<(String, String)>,
}

impl FactsTable {
    /// Relabels a two-column grid. Any other width is rejected.
    pub fn from_grid(grid: TableGrid) -> Option<Self> {
        let width = grid.iter().map(Vec::len).max()?;
        if width != FACTS_COLUMNS.len() {
            return None;
        }

        let rows = grid
            .into_iter()
            .map(|row| {
                let mut cells = row.into_iter();
                let key = cells.next().unwrap_or_default();
                let value = cells.next().unwrap_or_default();
                (key, value)
            })
            .collect();
        Some(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, description: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(key, _)| key == description)
            .map(|(_, value)| value.as_str())
    }

    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(key, _)| key.as_str())
    }

    /// Renders the table the way a dataframe with a named index prints: the
    /// value column label on the first header row, the index label on the
    /// second, one `<th>` key per body row.
    pub fn to_html(&self, classes: &str) -> String {
        let [index_label, value_label] = FACTS_COLUMNS;
        let mut html = String::new();

        html.push_str(&format!("<table border=\"1\" class=\"dataframe {}\">\n", escape_html(classes)));
        html.push_str("  <thead>\n");
        html.push_str("    <tr style=\"text-align: right;\">\n");
        html.push_str("      <th></th>\n");
        html.push_str(&format!("      <th>{}</th>\n", value_label));
        html.push_str("    </tr>\n");
        html.push_str("    <tr>\n");
        html.push_str(&format!("      <th>{}</th>\n", index_label));
        html.push_str("      <th></th>\n");
        html.push_str("    </tr>\n");
        html.push_str("  </thead>\n");
        html.push_str("  <tbody>\n");
        for (key, value) in &self.rows {
            html.push_str("    <tr>\n");
            html.push_str(&format!("      <th>{}</th>\n", escape_html(key)));
            html.push_str(&format!("      <td>{}</td>\n", escape_html(value)));
            html.push_str("    </tr>\n");
        }
        html.push_str("  </tbody>\n");
        html.push_str("</table>");
        html
    }
}

/// Facts table rendered to markup, or `None` if anything about fetching or
/// shaping it fails.
pub async fn mars_facts(tables: &dyn TableSource, config: &ScrapeConfig) -> Option<String> {
    let log = Logger::new().with_prefix("📊 [facts]");

    let grid = match tables.fetch_first_table(&config.facts_url).await {
        Ok(Some(grid)) => grid,
        Ok(None) => {
            log.warn(&format!("No table found at {}", config.facts_url));
            return None;
        }
        Err(e) => {
            log.warn(&format!("Failed to fetch {}: {}", config.facts_url, e));
            return None;
        }
    };

    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    let Some(table) = FactsTable::from_grid(grid) else {
        log.warn(&format!("Expected a two column table, found {} columns", width));
        return None;
    };

    log.info(&format!("Collected {} facts", table.len()));
    Some(table.to_html(FACTS_CLASSES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{facts_grid, FakeTables};

    #[test]
    fn test_from_grid_keys_by_first_column() {
        let table = FactsTable::from_grid(facts_grid()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("Polar Diameter:"), Some("6,752 km"));
        assert_eq!(
            table.descriptions().collect::<Vec<_>>(),
            vec!["Equatorial Diameter:", "Polar Diameter:", "Mass:"]
        );
    }

    #[test]
    fn test_from_grid_rejects_other_widths() {
        let three = vec![vec!["a".to_string(), "b".to_string(), "c".to_string()]];
        assert!(FactsTable::from_grid(three).is_none());
        let one = vec![vec!["a".to_string()]];
        assert!(FactsTable::from_grid(one).is_none());
        assert!(FactsTable::from_grid(vec![]).is_none());
    }

    #[test]
    fn test_to_html_has_two_labeled_columns() {
        let table = FactsTable::from_grid(facts_grid()).unwrap();
        let html = table.to_html(FACTS_CLASSES);

        assert!(html.starts_with("<table border=\"1\" class=\"dataframe table table-hover\">"));
        assert!(html.contains("<th>Mars</th>"));
        assert!(html.contains("<th>description</th>"));
        assert!(html.contains("<th>Equatorial Diameter:</th>\n      <td>6,792 km</td>"));
        assert_eq!(html.matches("<tbody>").count(), 1);
        assert_eq!(html.matches("<td>").count(), 3);
    }

    #[test]
    fn test_to_html_escapes_cells() {
        let grid = vec![vec!["a<b".to_string(), "1 & 2".to_string()]];
        let html = FactsTable::from_grid(grid).unwrap().to_html(FACTS_CLASSES);
        assert!(html.contains("<th>a&lt;b</th>"));
        assert!(html.contains("<td>1 &amp; 2</td>"));
    }

    #[tokio::test]
    async fn test_mars_facts_renders_table() {
        let config = ScrapeConfig::default();
        let html = mars_facts(&FakeTables::Grid(facts_grid()), &config).await.unwrap();
        assert!(html.contains("Mass:"));
    }

    #[tokio::test]
    async fn test_mars_facts_absent_on_failure() {
        let config = ScrapeConfig::default();
        assert!(mars_facts(&FakeTables::Unreachable, &config).await.is_none());
        assert!(mars_facts(&FakeTables::NoTable, &config).await.is_none());

        let wide = vec![vec!["a".to_string(), "b".to_string(), "c".to_string()]];
        assert!(mars_facts(&FakeTables::Grid(wide), &config).await.is_none());
    }
}
