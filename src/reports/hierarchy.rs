//! Location Hierarchy Module
//! Two-level county → town/city transaction counts for the sunburst view.

use std::collections::HashMap;

use crate::data::TransactionTable;
use crate::reports::{ensure_rows, CategoryCount, ReportError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyNode {
    pub name: String,
    pub total: usize,
    pub towns: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationHierarchy {
    pub total: usize,
    pub counties: Vec<CountyNode>,
}

/// Group transactions by county, then town/city inside each county.
/// Counties and towns come back largest-first; equal counts keep first-seen
/// order.
pub fn location_hierarchy(table: &TransactionTable) -> Result<LocationHierarchy, ReportError> {
    let total = ensure_rows(table)?;

    let mut counties: Vec<CountyNode> = Vec::new();
    let mut county_index: HashMap<String, usize> = HashMap::new();
    let mut town_index: Vec<HashMap<String, usize>> = Vec::new();

    for tx in table.records() {
        let at = match county_index.get(tx.county.as_str()) {
            Some(&at) => at,
            None => {
                county_index.insert(tx.county.clone(), counties.len());
                counties.push(CountyNode {
                    name: tx.county.clone(),
                    total: 0,
                    towns: Vec::new(),
                });
                town_index.push(HashMap::new());
                counties.len() - 1
            }
        };

        let county = &mut counties[at];
        county.total += 1;
        match town_index[at].get(tx.town_city.as_str()) {
            Some(&town_at) => county.towns[town_at].count += 1,
            None => {
                town_index[at].insert(tx.town_city.clone(), county.towns.len());
                county.towns.push(CategoryCount {
                    label: tx.town_city.clone(),
                    count: 1,
                });
            }
        }
    }

    counties.sort_by(|a, b| b.total.cmp(&a.total));
    for county in &mut counties {
        county.towns.sort_by(|a, b| b.count.cmp(&a.count));
    }

    Ok(LocationHierarchy { total, counties })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::transaction;
    use crate::data::PropertyType;

    #[test]
    fn nests_towns_under_counties() {
        let rows = [
            ("LEEDS", "WEST YORKSHIRE"),
            ("LEEDS", "WEST YORKSHIRE"),
            ("BRADFORD", "WEST YORKSHIRE"),
            ("BATH", "SOMERSET"),
        ];
        let table = TransactionTable::new(
            rows.iter()
                .map(|(town, county)| transaction(PropertyType::Detached, town, county))
                .collect(),
        );

        let hierarchy = location_hierarchy(&table).unwrap();
        assert_eq!(hierarchy.total, 4);
        assert_eq!(hierarchy.counties.len(), 2);

        let yorkshire = &hierarchy.counties[0];
        assert_eq!(yorkshire.name, "WEST YORKSHIRE");
        assert_eq!(yorkshire.total, 3);
        assert_eq!(yorkshire.towns[0].label, "LEEDS");
        assert_eq!(yorkshire.towns[0].count, 2);

        // county totals always equal the sum of their towns
        for county in &hierarchy.counties {
            let sum: usize = county.towns.iter().map(|t| t.count).sum();
            assert_eq!(county.total, sum);
        }
    }

    #[test]
    fn empty_table_is_an_error() {
        assert_eq!(
            location_hierarchy(&TransactionTable::default()).unwrap_err(),
            ReportError::EmptyDataset
        );
    }
}
