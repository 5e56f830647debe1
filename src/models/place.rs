//! Where an expense happened

use serde::{Deserialize, Serialize};
use std::fmt;

/// City, town and shop of an expense; every part is optional free text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop: Option<String>,
}

impl Place {
    /// Build a place from raw labels, treating blank text as absent
    pub fn new(city: &str, town: &str, shop: &str) -> Self {
        Self {
            city: non_blank(city),
            town: non_blank(town),
            shop: non_blank(shop),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.town.is_none() && self.shop.is_none()
    }
}

pub(crate) fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.shop, &self.town, &self.city]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
