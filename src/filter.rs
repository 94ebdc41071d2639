//! Filtering helper.

use std::collections::BTreeMap;

use crate::params::Params;

/// Filter parameters for queries that support filtering.
///
/// Names are serialized in lexicographic order so the same filter always
/// produces the same parameters, whatever order the names were added in.
///
/// ```
/// use aws_query::Filter;
///
/// let mut filter = Filter::new();
/// filter.add("engine", ["mysql"]);
/// filter.add("state", ["available", "pending"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    m: BTreeMap<String, Vec<String>>,
}

impl Filter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one or more values for `name`. Repeated calls accumulate.
    pub fn add<I, V>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.m
            .entry(name.to_string())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Whether no names have been added.
    pub fn is_empty(&self) -> bool {
        self.m.is_empty()
    }

    /// Write `Filter.N.Name` / `Filter.N.Value.M` entries into `params`.
    pub fn add_params(&self, params: &mut Params) {
        for (i, (name, values)) in self.m.iter().enumerate() {
            let prefix = format!("Filter.{}", i + 1);
            params.insert(format!("{}.Name", prefix), name.clone());
            for (j, value) in values.iter().enumerate() {
                params.insert(format!("{}.Value.{}", prefix, j + 1), value.clone());
            }
        }
    }
}

/// Apply an optional filter; `None` or an empty filter leaves `params`
/// untouched.
pub fn add_filter(params: &mut Params, filter: Option<&Filter>) {
    if let Some(filter) = filter.filter(|f| !f.is_empty()) {
        filter.add_params(params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_sorted() {
        let mut filter = Filter::new();
        filter.add("b", ["2"]);
        filter.add("a", ["1", "3"]);

        let mut params = Params::new();
        add_filter(&mut params, Some(&filter));

        assert_eq!(params.len(), 5);
        assert_eq!(params["Filter.1.Name"], "a");
        assert_eq!(params["Filter.1.Value.1"], "1");
        assert_eq!(params["Filter.1.Value.2"], "3");
        assert_eq!(params["Filter.2.Name"], "b");
        assert_eq!(params["Filter.2.Value.1"], "2");
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let mut first = Filter::new();
        first.add("state", ["available"]).add("engine", ["mysql"]);
        let mut second = Filter::new();
        second.add("engine", ["mysql"]).add("state", ["available"]);

        let mut a = Params::new();
        let mut b = Params::new();
        first.add_params(&mut a);
        second.add_params(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_none_filter_is_noop() {
        let mut params = Params::new();
        params.insert("Action".into(), "DescribeSubnets".into());
        add_filter(&mut params, None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_add_accumulates() {
        let mut filter = Filter::new();
        filter.add("tag:Name", ["web"]);
        filter.add("tag:Name", ["web", "db"]);

        let mut params = Params::new();
        filter.add_params(&mut params);
        assert_eq!(params["Filter.1.Name"], "tag:Name");
        assert_eq!(params["Filter.1.Value.1"], "web");
        assert_eq!(params["Filter.1.Value.2"], "web");
        assert_eq!(params["Filter.1.Value.3"], "db");
    }

    #[test]
    fn test_empty_filter() {
        let filter = Filter::new();
        assert!(filter.is_empty());
        let mut params = Params::new();
        add_filter(&mut params, Some(&filter));
        assert!(params.is_empty());
    }
}
