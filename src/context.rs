use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::utils::CCStr;

/// Opaque state attached to a single navigation
pub type NavigationState = Value;

/// Route parameters of the current route, by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Params(BTreeMap<CCStr, CCStr>);

impl Params {
    /// Extracts the parameters of a typed route from its serde representation.
    ///
    /// Route enums serialize as `{ "Variant": { "field": value, ... } }`. Every field becomes a
    /// parameter: strings as is, numbers and booleans stringified, sequences (catch-all segments)
    /// joined with `/`. Nested routes are flattened into the same map and unit variants have no
    /// parameter.
    ///
    /// Path, query and hash segments all land in the same map, under their field name. A field
    /// holding a plain struct is kept as its JSON text. A struct with a single struct-valued field
    /// has the shape of a nested route and is flattened like one.
    pub fn from_route<R: Serialize>(route: &R) -> Result<Self, serde_json::Error> {
        let mut params = BTreeMap::new();
        collect_variant_fields(&serde_json::to_value(route)?, &mut params);
        Ok(Self(params))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|v| v.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<CCStr>, V: Into<CCStr>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn collect_variant_fields(value: &Value, params: &mut BTreeMap<CCStr, CCStr>) {
    let Value::Object(variants) = value else {
        return;
    };
    for fields in variants.values() {
        let Value::Object(fields) = fields else {
            continue;
        };
        for (name, field) in fields {
            match field {
                Value::Object(map) if is_variant(map) => collect_variant_fields(field, params),
                Value::Object(_) => {
                    params.insert(CCStr::from(name), CCStr::from(field.to_string()));
                }
                Value::Null => (),
                _ => {
                    if let Some(s) = scalar_to_string(field) {
                        params.insert(CCStr::from(name), CCStr::from(s));
                    }
                }
            }
        }
    }
}

/// `{ "Variant": { .. } }`, the shape of a nested route
fn is_variant(map: &serde_json::Map<String, Value>) -> bool {
    map.len() == 1 && map.values().all(Value::is_object)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(scalar_to_string)
                .collect::<Vec<_>>()
                .join("/"),
        ),
        Value::Null | Value::Object(_) => None,
    }
}

/// Where the router currently is.
///
/// `search` and `hash` keep their leading `?` and `#` and are empty when absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Location {
    pub path: CCStr,
    pub search: CCStr,
    pub hash: CCStr,
    pub state: Option<NavigationState>,
}

impl Location {
    pub fn parse(url: &str, state: Option<NavigationState>) -> Self {
        let (rest, hash) = match url.find('#') {
            Some(idx) => url.split_at(idx),
            None => (url, ""),
        };
        let (path, search) = match rest.find('?') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        Self {
            path: path.into(),
            search: search.into(),
            hash: hash.into(),
            state,
        }
    }
}

/// Read-only snapshot handed to an initial props resolver
#[derive(Debug, Clone, PartialEq)]
pub struct PageContext<R> {
    pub route: R,
    pub params: Params,
    pub location: Location,
}

impl<R: Serialize + core::fmt::Display> PageContext<R> {
    pub fn from_route(route: R, state: Option<NavigationState>) -> Self {
        let params = Params::from_route(&route).unwrap_or_else(|e| {
            log::warn!("could not extract route parameters: {e}");
            Params::default()
        });
        let location = Location::parse(&route.to_string(), state);
        Self {
            route,
            params,
            location,
        }
    }
}
