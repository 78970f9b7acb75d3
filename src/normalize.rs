// src/normalize.rs
//! Entity-name keys and the key → entity-id join.
//!
//! Scraped names drift in punctuation, accents and case ("Café 1919",
//! "CAFE&nbsp;1919", "Cafe1919"). All of them reduce to the same key, and an
//! [`EntityMatcher`] turns keys into configured ids.

use std::collections::{BTreeMap, HashMap};

use crate::config::Catalog;
use crate::core::sanitize::fold_diacritics;

/// Lowercase, fold accents, keep only ASCII letters and digits.
/// Idempotent: `normalize_key(&normalize_key(x)) == normalize_key(x)`.
pub fn normalize_key(name: &str) -> String {
    fold_diacritics(name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Maps a normalized key to a stable entity id.
pub trait EntityMatcher {
    fn match_key(&self, key: &str) -> Option<&str>;
}

/// Two-step join: display names and aliases first, then the ids themselves
/// (so a page that prints `BruinPlate` still lands).
#[derive(Clone, Debug, Default)]
pub struct CatalogMatcher {
    by_name: HashMap<String, String>,
    by_id: HashMap<String, String>,
}

impl CatalogMatcher {
    pub fn new(catalog: &Catalog) -> Self {
        let mut by_name = HashMap::new();
        let mut by_id = HashMap::new();
        for entity in catalog.iter() {
            for name in entity.names() {
                let key = normalize_key(name);
                if key.is_empty() { continue; }
                // first entity to claim a name keeps it
                by_name.entry(key).or_insert_with(|| entity.id.clone());
            }
            by_id.entry(normalize_key(&entity.id)).or_insert_with(|| entity.id.clone());
        }
        Self { by_name, by_id }
    }
}

impl EntityMatcher for CatalogMatcher {
    fn match_key(&self, key: &str) -> Option<&str> {
        self.by_name
            .get(key)
            .or_else(|| self.by_id.get(key))
            .map(String::as_str)
    }
}

/// Re-key extraction results by entity id. Unmatched keys are dropped; rows
/// from several keys that resolve to the same id are concatenated in key order.
pub fn join<T: Clone>(
    by_key: &BTreeMap<String, Vec<T>>,
    matcher: &dyn EntityMatcher,
) -> HashMap<String, Vec<T>> {
    let mut out: HashMap<String, Vec<T>> = HashMap::new();
    for (key, rows) in by_key {
        match matcher.match_key(key) {
            Some(id) => out.entry(s!(id)).or_default().extend(rows.iter().cloned()),
            None => logd!("no entity for scraped key {key:?}"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_ignore_accents_case_and_punctuation() {
        assert_eq!(normalize_key("Café 1919"), normalize_key("cafe1919"));
        assert_eq!(normalize_key("Café 1919"), "cafe1919");
        assert_eq!(normalize_key("Wetzel’s Pretzels"), "wetzelspretzels");
        assert_eq!(normalize_key("Rubio's"), normalize_key("RUBIO’S"));
        assert_eq!(normalize_key("CORE (Ready-to-Eat)"), "corereadytoeat");
        assert_eq!(normalize_key("  "), "");
    }

    #[test]
    fn keys_are_idempotent() {
        for name in ["Café 1919", "Bruin Café", "Hugh & Hazel Darling Law Library", "ÆØÅ ß", "日本 Cafe"] {
            let once = normalize_key(name);
            assert_eq!(normalize_key(&once), once, "{name}");
        }
    }

    #[test]
    fn digits_keep_similar_cafes_apart() {
        assert_ne!(normalize_key("Cafe 451"), normalize_key("Café 1919"));
    }

    #[test]
    fn matcher_prefers_names_then_ids() {
        let m = CatalogMatcher::new(&Catalog::builtin());
        assert_eq!(m.match_key(&normalize_key("Bruin Plate")), Some("BruinPlate"));
        assert_eq!(m.match_key(&normalize_key("Bruin Plate Residential Restaurant")), Some("BruinPlate"));
        assert_eq!(m.match_key(&normalize_key("BruinPlate")), Some("BruinPlate"));
        assert_eq!(m.match_key(&normalize_key("Bruin Café")), Some("BruinCafe"));
        assert_eq!(m.match_key(&normalize_key("Powell Library")), Some("powell"));
        // residential hall is listed first and keeps the shared display name
        assert_eq!(m.match_key(&normalize_key("Epicuria at Ackerman")), Some("EpicuriaAtAckerman"));
        assert_eq!(m.match_key(&normalize_key("EpicuriaAck")), Some("EpicuriaAck"));
        assert_eq!(m.match_key("nowhere"), None);
    }

    #[test]
    fn join_drops_unknown_and_merges_aliases() {
        let m = CatalogMatcher::new(&Catalog::builtin());
        let mut by_key = BTreeMap::new();
        by_key.insert(normalize_key("Bruin Plate"), vec![1]);
        by_key.insert(normalize_key("Bruin Plate Residential Restaurant"), vec![2]);
        by_key.insert(s!("mysteryhall"), vec![3]);

        let joined = join(&by_key, &m);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined["BruinPlate"], vec![1, 2]);
    }
}
