//! Query parameter construction.

use std::collections::BTreeMap;

/// Flat string-keyed parameter set of a query request.
pub type Params = BTreeMap<String, String>;

/// Start a parameter set for `action`.
pub fn make_params(action: &str) -> Params {
    let mut params = Params::new();
    params.insert("Action".to_string(), action.to_string());
    params
}

/// Write `label.1`, `label.2`, ... for each id, in order.
pub fn add_params_list(params: &mut Params, label: &str, ids: &[&str]) {
    for (i, id) in ids.iter().enumerate() {
        params.insert(format!("{}.{}", label, i + 1), id.to_string());
    }
}
