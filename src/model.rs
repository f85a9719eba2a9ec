//! Core data models for the coverage map.
//! Departments come from a GeoJSON file, banks from a flat JSON list; both
//! are immutable once loaded and joined by a normalized DANE code.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::rc::Rc;
use yew::Reducible;

use crate::error::{Result, ViewerError};
use crate::state::camera::{CameraRequest, CameraTarget};
use crate::state::selection::{DepartmentPick, Selection};

/// Property names that may carry a department code, highest priority first.
pub const CODE_PROPERTY_KEYS: [&str; 3] = ["DPTO_CCDGO", "COD_DANE", "id"];
/// Property names that may carry a department's display name.
pub const NAME_PROPERTY_KEYS: [&str; 2] = ["name", "DPTO_CNMBR"];

/// Turns a raw JSON code (string or number) into its canonical string form.
/// Empty strings and non-scalar values have no code.
pub fn normalize_code(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                // f64 Display drops a zero fraction: 5.0 -> "5"
                n.as_f64().map(|f| f.to_string())
            }
        }
        _ => None,
    }
}

/// First candidate key yielding a code wins; later keys are never consulted.
pub fn resolve_department_code(properties: &Map<String, Value>) -> Option<String> {
    CODE_PROPERTY_KEYS
        .iter()
        .find_map(|key| properties.get(*key).and_then(normalize_code))
}

fn resolve_department_name(properties: &Map<String, Value>) -> Option<String> {
    NAME_PROPERTY_KEYS.iter().find_map(|key| {
        properties
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BankId(pub usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepartmentFeature {
    pub code: Option<String>,
    pub name: Option<String>,
    /// The GeoJSON feature as read from disk, handed to the map untouched.
    pub source: Value,
}

impl DepartmentFeature {
    pub fn from_geojson(source: Value) -> Self {
        let (code, name) = match source.get("properties").and_then(Value::as_object) {
            Some(props) => (resolve_department_code(props), resolve_department_name(props)),
            None => (None, None),
        };
        Self { code, name, source }
    }

    pub fn geometry(&self) -> Option<&Value> {
        self.source.get("geometry")
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Value>,
}

/// Department polygons in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeoFeatureStore {
    features: Vec<DepartmentFeature>,
}

impl GeoFeatureStore {
    pub fn new(features: Vec<DepartmentFeature>) -> Self {
        Self { features }
    }

    pub fn from_geojson_str(text: &str) -> Result<Self> {
        let doc: FeatureCollection =
            serde_json::from_str(text).map_err(|source| ViewerError::Parse {
                resource: "department boundaries",
                source,
            })?;
        Ok(Self::new(
            doc.features
                .into_iter()
                .map(DepartmentFeature::from_geojson)
                .collect(),
        ))
    }

    pub fn features(&self) -> &[DepartmentFeature] {
        &self.features
    }

    pub fn get(&self, id: FeatureId) -> Option<&DepartmentFeature> {
        self.features.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// First feature (in file order) carrying `code`.
    pub fn find_by_code(&self, code: &str) -> Option<FeatureId> {
        self.features
            .iter()
            .position(|f| f.code.as_deref() == Some(code))
            .map(FeatureId)
    }
}

fn deserialize_code<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(normalize_code(&raw))
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BankRecord {
    #[serde(rename = "bank")]
    pub bank_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "name", default)]
    pub department_name: String,
    #[serde(rename = "dane_code", default, deserialize_with = "deserialize_code")]
    pub department_code: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BankRegistry {
    banks: Vec<BankRecord>,
}

impl BankRegistry {
    pub fn new(banks: Vec<BankRecord>) -> Self {
        Self { banks }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let banks: Vec<BankRecord> =
            serde_json::from_str(text).map_err(|source| ViewerError::Parse {
                resource: "bank list",
                source,
            })?;
        Ok(Self::new(banks))
    }

    pub fn get(&self, id: BankId) -> Option<&BankRecord> {
        self.banks.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.banks.len()
    }

    pub fn ids(&self) -> Vec<BankId> {
        (0..self.banks.len()).map(BankId).collect()
    }

    /// Banks tagged with `code`. A missing code matches nothing.
    pub fn in_department(&self, code: Option<&str>) -> Vec<BankId> {
        let Some(code) = code else {
            return Vec::new();
        };
        self.banks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.department_code.as_deref() == Some(code))
            .map(|(i, _)| BankId(i))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BankRecord> {
        self.banks.iter()
    }
}

/// Department codes referenced by at least one bank.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveCodeSet(HashSet<String>);

impl ActiveCodeSet {
    pub fn from_registry(registry: &BankRegistry) -> Self {
        Self(
            registry
                .iter()
                .filter_map(|b| b.department_code.clone())
                .collect(),
        )
    }

    pub fn contains(&self, code: Option<&str>) -> bool {
        code.is_some_and(|c| self.0.contains(c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    pub departments: GeoFeatureStore,
    pub banks: BankRegistry,
    pub active_codes: ActiveCodeSet,
}

impl Dataset {
    pub fn new(departments: GeoFeatureStore, banks: BankRegistry) -> Self {
        let active_codes = ActiveCodeSet::from_registry(&banks);
        Self {
            departments,
            banks,
            active_codes,
        }
    }

    pub fn parse(boundaries: &str, banks: &str) -> Result<Self> {
        Ok(Self::new(
            GeoFeatureStore::from_geojson_str(boundaries)?,
            BankRegistry::from_json_str(banks)?,
        ))
    }

    /// The polygon a bank belongs to, if its code resolves to one.
    pub fn department_for_bank(&self, bank: BankId) -> Option<FeatureId> {
        let code = self.banks.get(bank)?.department_code.as_deref()?;
        self.departments.find_by_code(code)
    }

    pub fn covered_department_count(&self) -> usize {
        self.departments
            .features()
            .iter()
            .filter(|f| self.active_codes.contains(f.code.as_deref()))
            .count()
    }

    /// Bank codes with no matching polygon, sorted and deduplicated.
    pub fn unmatched_bank_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self
            .active_codes
            .0
            .iter()
            .filter(|c| self.departments.find_by_code(c).is_none())
            .cloned()
            .collect();
        codes.sort();
        codes
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Pending,
    Ready,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub status: LoadStatus,
    pub data: Option<Rc<Dataset>>,
    pub selection: Selection,
    /// Latest camera move; the map view replays it whenever the id changes.
    pub camera: CameraRequest,
}

impl AppState {
    pub fn emphasized_feature(&self) -> Option<FeatureId> {
        self.data
            .as_deref()
            .and_then(|data| self.selection.emphasized_feature(data))
    }
}

#[derive(Clone, Debug)]
pub enum AppAction {
    Loaded(Rc<Dataset>),
    LoadFailed,
    SelectDepartment(FeatureId),
    SelectBank(BankId),
    Home,
}

impl Reducible for AppState {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use AppAction::*;
        let mut new = (*self).clone();
        match action {
            Loaded(data) => {
                new.data = Some(data);
                new.status = LoadStatus::Ready;
                new.selection = Selection::Idle;
            }
            LoadFailed => {
                new.status = LoadStatus::Failed;
            }
            SelectDepartment(feature) => {
                let Some(data) = self.data.as_deref() else {
                    return self;
                };
                let Some(department) = data.departments.get(feature) else {
                    return self;
                };
                new.selection = Selection::Department(DepartmentPick {
                    feature,
                    code: department.code.clone(),
                });
                new.camera = self.camera.next(CameraTarget::Department(feature));
                log::debug!("department {:?} selected (code {:?})", feature, department.code);
            }
            SelectBank(bank) => {
                let Some(data) = self.data.as_deref() else {
                    return self;
                };
                if data.banks.get(bank).is_none() {
                    return self;
                }
                new.selection = self.selection.select_bank(bank);
                match data.department_for_bank(bank) {
                    Some(feature) => {
                        new.camera = self.camera.next(CameraTarget::Department(feature));
                    }
                    None => {
                        log::debug!("bank {:?} has no department on the map", bank);
                        new.camera = self.camera.next(CameraTarget::Hold);
                    }
                }
            }
            Home => {
                new.selection = Selection::Idle;
                new.camera = self.camera.next(CameraTarget::Home);
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use serde_json::json;

    pub fn feature(props: Value) -> DepartmentFeature {
        DepartmentFeature::from_geojson(json!({
            "type": "Feature",
            "properties": props,
            "geometry": { "type": "Polygon", "coordinates": [] }
        }))
    }

    pub fn bank(name: &str, dept: &str, code: Option<&str>) -> BankRecord {
        BankRecord {
            bank_name: name.to_string(),
            address: format!("Calle {name}"),
            department_name: dept.to_string(),
            department_code: code.map(str::to_string),
        }
    }

    /// "05" Antioquia with two banks, "08" Atlántico with none, one orphan bank.
    pub fn dataset() -> Dataset {
        Dataset::new(
            GeoFeatureStore::new(vec![
                feature(json!({ "DPTO_CCDGO": "05", "DPTO_CNMBR": "ANTIOQUIA" })),
                feature(json!({ "DPTO_CCDGO": "08", "DPTO_CNMBR": "ATLÁNTICO" })),
                feature(json!({ "COD_DANE": 11, "name": "Bogotá" })),
            ]),
            BankRegistry::new(vec![
                bank("Banco Uno", "Antioquia", Some("05")),
                bank("Banco Dos", "Antioquia", Some("05")),
                bank("Banco Tres", "Bogotá", Some("11")),
                bank("Banco Sin Código", "Desconocido", None),
            ]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{bank, dataset, feature};
    use super::*;
    use crate::state::ListView;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn normalizes_strings_and_numbers_alike() {
        assert_eq!(normalize_code(&json!("05")), Some("05".to_string()));
        assert_eq!(normalize_code(&json!(" 11 ")), Some("11".to_string()));
        assert_eq!(normalize_code(&json!(11)), Some("11".to_string()));
        assert_eq!(normalize_code(&json!(11.0)), Some("11".to_string()));
        assert_eq!(normalize_code(&json!("")), None);
        assert_eq!(normalize_code(&json!("   ")), None);
        assert_eq!(normalize_code(&Value::Null), None);
        assert_eq!(normalize_code(&json!(true)), None);
    }

    #[test]
    fn code_lookup_follows_key_priority() {
        let f = feature(json!({ "DPTO_CCDGO": "05", "COD_DANE": "99", "id": 7 }));
        assert_eq!(f.code.as_deref(), Some("05"));

        let f = feature(json!({ "DPTO_CCDGO": "", "COD_DANE": "99", "id": 7 }));
        assert_eq!(f.code.as_deref(), Some("99"));

        let f = feature(json!({ "DPTO_CCDGO": null, "id": 7 }));
        assert_eq!(f.code.as_deref(), Some("7"));

        let f = feature(json!({ "NOMBRE": "x" }));
        assert_eq!(f.code, None);
    }

    #[test]
    fn name_lookup_prefers_name_over_dane_field() {
        let f = feature(json!({ "name": "Bogotá", "DPTO_CNMBR": "BOGOTA D.C." }));
        assert_eq!(f.name.as_deref(), Some("Bogotá"));
        let f = feature(json!({ "DPTO_CNMBR": "CHOCÓ" }));
        assert_eq!(f.name.as_deref(), Some("CHOCÓ"));
    }

    #[test]
    fn feature_without_properties_has_no_code() {
        let f = DepartmentFeature::from_geojson(json!({ "type": "Feature", "geometry": null }));
        assert_eq!(f.code, None);
        assert_eq!(f.name, None);
    }

    #[test]
    fn parses_bank_list_with_mixed_code_types() {
        let registry = BankRegistry::from_json_str(
            r#"[
                {"bank": "A", "name": "Antioquia", "address": "Cra 1", "dane_code": "05"},
                {"bank": "B", "name": "Bogotá", "address": "Cl 2", "dane_code": 11},
                {"bank": "C", "name": "?", "address": "Cl 3"},
                {"bank": "D", "name": "?", "address": "Cl 4", "dane_code": null}
            ]"#,
        )
        .unwrap();
        let codes: Vec<Option<&str>> = registry
            .iter()
            .map(|b| b.department_code.as_deref())
            .collect();
        assert_eq!(codes, vec![Some("05"), Some("11"), None, None]);
    }

    #[test]
    fn rejects_malformed_resources() {
        assert!(matches!(
            GeoFeatureStore::from_geojson_str("{\"type\":\"FeatureCollection\"}"),
            Err(ViewerError::Parse { .. })
        ));
        assert!(matches!(
            BankRegistry::from_json_str("[{\"name\": \"no bank field\"}]"),
            Err(ViewerError::Parse { .. })
        ));
    }

    #[test]
    fn active_codes_come_from_banks_only() {
        let data = dataset();
        assert_eq!(data.active_codes.len(), 2);
        assert!(data.active_codes.contains(Some("05")));
        assert!(data.active_codes.contains(Some("11")));
        assert!(!data.active_codes.contains(Some("08")));
        assert!(!data.active_codes.contains(None));
        assert_eq!(data.covered_department_count(), 2);
    }

    #[test]
    fn missing_code_never_matches_banks() {
        let registry = BankRegistry::new(vec![bank("X", "?", None)]);
        assert!(registry.in_department(None).is_empty());
    }

    #[test]
    fn reports_bank_codes_without_polygons() {
        let data = Dataset::new(
            GeoFeatureStore::new(vec![feature(json!({ "DPTO_CCDGO": "05" }))]),
            BankRegistry::new(vec![
                bank("A", "?", Some("05")),
                bank("B", "?", Some("99")),
                bank("C", "?", Some("88")),
            ]),
        );
        assert_eq!(data.unmatched_bank_codes(), vec!["88".to_string(), "99".to_string()]);
    }

    fn loaded() -> Rc<AppState> {
        Rc::new(AppState::default()).reduce(AppAction::Loaded(Rc::new(dataset())))
    }

    #[test]
    fn clicks_before_load_are_ignored() {
        let state = Rc::new(AppState::default());
        let after = state.clone().reduce(AppAction::SelectDepartment(FeatureId(0)));
        assert!(Rc::ptr_eq(&state, &after));
        let after = state.clone().reduce(AppAction::SelectBank(BankId(0)));
        assert!(Rc::ptr_eq(&state, &after));
    }

    #[test]
    fn load_failure_keeps_view_empty() {
        let state = Rc::new(AppState::default()).reduce(AppAction::LoadFailed);
        assert_eq!(state.status, LoadStatus::Failed);
        assert!(state.data.is_none());
        assert_eq!(state.selection, Selection::Idle);
    }

    #[test]
    fn department_click_requests_camera_move() {
        let state = loaded().reduce(AppAction::SelectDepartment(FeatureId(1)));
        assert_eq!(state.camera.target, Some(CameraTarget::Department(FeatureId(1))));
        assert_eq!(state.camera.id, 1);
        assert_eq!(state.emphasized_feature(), None);
    }

    #[test]
    fn bank_click_emphasizes_its_department_only() {
        let state = loaded()
            .reduce(AppAction::SelectBank(BankId(2)))
            .reduce(AppAction::SelectBank(BankId(0)));
        assert_eq!(state.emphasized_feature(), Some(FeatureId(0)));
        assert_eq!(state.camera.target, Some(CameraTarget::Department(FeatureId(0))));
        assert_eq!(state.camera.id, 2);
    }

    #[test]
    fn bank_without_polygon_halts_pending_flight() {
        let before = loaded().reduce(AppAction::SelectDepartment(FeatureId(0)));
        let after = before.clone().reduce(AppAction::SelectBank(BankId(3)));
        assert_eq!(after.camera.target, Some(CameraTarget::Hold));
        assert_ne!(after.camera.id, before.camera.id);
        assert_eq!(after.emphasized_feature(), None);
        assert_eq!(after.selection.active_bank(), Some(BankId(3)));
    }

    #[test]
    fn info_panel_is_stable_across_home_round_trip() {
        let first = loaded().reduce(AppAction::SelectBank(BankId(1)));
        let data = first.data.clone().unwrap();
        let shown = first.selection.info_bank(&data).cloned();

        let home = first.reduce(AppAction::Home);
        assert_eq!(home.selection.list_view(&data), ListView::Banks(data.banks.ids()));
        assert_eq!(home.selection.info_bank(&data), None);

        let again = home.reduce(AppAction::SelectBank(BankId(1)));
        assert_eq!(again.selection.info_bank(&data).cloned(), shown);
        assert_eq!(shown.map(|b| b.bank_name), Some("Banco Dos".to_string()));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let state = loaded();
        let after = state.clone().reduce(AppAction::SelectBank(BankId(42)));
        assert!(Rc::ptr_eq(&state, &after));
        let after = state.clone().reduce(AppAction::SelectDepartment(FeatureId(42)));
        assert!(Rc::ptr_eq(&state, &after));
    }

    #[test]
    fn home_resets_from_any_state() {
        for action in [
            AppAction::SelectDepartment(FeatureId(1)),
            AppAction::SelectBank(BankId(1)),
            AppAction::Home,
        ] {
            let state = loaded().reduce(action).reduce(AppAction::Home);
            assert_eq!(state.selection, Selection::Idle);
            assert_eq!(state.camera.target, Some(CameraTarget::Home));
            assert_eq!(state.emphasized_feature(), None);
        }
    }
}
