//! Query parameters for the expense list. Filters are rebuilt from the
//! live form controls at request time; nothing here is cached between
//! requests.

#[derive(Clone, Default, PartialEq)]
pub struct ExpenseFilters {
    pub search: String,
    pub category: String,
    pub date_from: String,
    pub date_to: String,
    pub sort: String,
}

impl ExpenseFilters {
    /// Key/value pairs for the list request. An empty control is omitted
    /// entirely; the backend must never see `key=`, which it would read
    /// as "match the empty string".
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let fields = [
            ("search", &self.search),
            ("category", &self.category),
            ("date_from", &self.date_from),
            ("date_to", &self.date_to),
            ("sort", &self.sort),
        ];
        fields
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key, value.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_controls_are_omitted() {
        let filters = ExpenseFilters::default();
        assert!(filters.query_pairs().is_empty());
        assert!(filters.is_empty());
    }

    #[test]
    fn only_set_controls_appear() {
        let filters = ExpenseFilters {
            search: "coffee".into(),
            sort: "date_desc".into(),
            ..Default::default()
        };
        let pairs = filters.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("search", "coffee".to_string()),
                ("sort", "date_desc".to_string()),
            ]
        );
    }

    #[test]
    fn all_five_keys_pass_through_untransformed() {
        let filters = ExpenseFilters {
            search: "rent".into(),
            category: "Bills".into(),
            date_from: "2024-01-01".into(),
            date_to: "2024-01-31".into(),
            sort: "amount_asc".into(),
        };
        let pairs = filters.query_pairs();
        assert_eq!(pairs.len(), 5);
        assert!(pairs.contains(&("category", "Bills".to_string())));
        assert!(pairs.contains(&("date_from", "2024-01-01".to_string())));
        assert!(pairs.contains(&("date_to", "2024-01-31".to_string())));
    }
}
