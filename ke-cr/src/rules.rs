use ke_core::prelude::*;

// Split a comma-separated flag value into its items.  Whitespace around items is trimmed,
// empty items are dropped, and an item repeated within one list only counts once.
pub fn split_list(raw: &str) -> Vec<String> {
    unique(raw.split(',').map(str::trim).filter(|item| !item.is_empty()))
}

// API groups are split the same way except that empty items are kept, since "" is the core
// group; no groups at all means just the core group.
pub fn split_api_groups(raw: Option<&str>) -> Vec<String> {
    unique(raw.unwrap_or_default().split(',').map(str::trim))
}

pub fn build_rule(verbs: &[String], resources: &[String], api_groups: &[String]) -> rbacv1::PolicyRule {
    rbacv1::PolicyRule {
        verbs: verbs.to_vec(),
        resources: Some(resources.to_vec()),
        api_groups: Some(api_groups.to_vec()),
        ..Default::default()
    }
}

fn unique<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = vec![];
    for item in items {
        if !out.iter().any(|seen| seen == item) {
            out.push(item.into());
        }
    }
    out
}
