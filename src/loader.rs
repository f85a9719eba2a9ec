// Fetches both static resources at once and builds the dataset.
use futures_util::future::try_join;
use gloo_net::http::Request;

use crate::config::DataSources;
use crate::error::{Result, ViewerError};
use crate::model::Dataset;

async fn fetch_text(url: &str) -> Result<String> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|source| ViewerError::Fetch {
            url: url.to_string(),
            source,
        })?;
    if !resp.ok() {
        return Err(ViewerError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    resp.text().await.map_err(|source| ViewerError::Fetch {
        url: url.to_string(),
        source,
    })
}

pub async fn load_dataset(sources: &DataSources) -> Result<Dataset> {
    let (boundaries, banks) = try_join(
        fetch_text(&sources.boundaries_url),
        fetch_text(&sources.banks_url),
    )
    .await?;
    let data = Dataset::parse(&boundaries, &banks)?;
    log_summary(&data);
    Ok(data)
}

fn log_summary(data: &Dataset) {
    log::info!(
        "loaded {} departments and {} banks ({} distinct codes); {} departments with coverage",
        data.departments.len(),
        data.banks.len(),
        data.active_codes.len(),
        data.covered_department_count()
    );
    let orphans = data.unmatched_bank_codes();
    if !orphans.is_empty() {
        log::warn!("bank department codes with no polygon: {}", orphans.join(", "));
    }
    let codeless = data
        .departments
        .features()
        .iter()
        .filter(|f| f.code.is_none())
        .count();
    if codeless > 0 {
        log::warn!("{codeless} department features have no recognizable code");
    }
    let shapeless = data
        .departments
        .features()
        .iter()
        .filter(|f| f.geometry().is_none_or(|g| g.is_null()))
        .count();
    if shapeless > 0 {
        log::warn!("{shapeless} department features have no geometry");
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{BankId, Dataset, FeatureId};
    use crate::state::selection::{DepartmentPick, ListView, Selection};
    use pretty_assertions::assert_eq;

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"DPTO_CCDGO": "05", "DPTO_CNMBR": "ANTIOQUIA"},
             "geometry": {"type": "Polygon", "coordinates": [[[-76.0, 6.0], [-75.0, 6.0], [-75.0, 7.0], [-76.0, 6.0]]]}},
            {"type": "Feature", "properties": {"DPTO_CCDGO": "08", "DPTO_CNMBR": "ATLÁNTICO"},
             "geometry": {"type": "MultiPolygon", "coordinates": []}}
        ]
    }"#;

    const BANKS: &str = r#"[
        {"bank": "Banco Norte", "name": "Antioquia", "address": "Cra 43A #1-50", "dane_code": "05"},
        {"bank": "Banco Sur", "name": "Antioquia", "address": "Cl 10 #40-20", "dane_code": 5},
        {"bank": "Banco Centro", "name": "Antioquia", "address": "Av 80 #30-10", "dane_code": "05"}
    ]"#;

    fn department(data: &Dataset, id: usize) -> Selection {
        let feature = FeatureId(id);
        Selection::Department(DepartmentPick {
            feature,
            code: data.departments.get(feature).and_then(|f| f.code.clone()),
        })
    }

    #[test]
    fn parsed_files_drive_the_filtered_list() {
        let data = Dataset::parse(BOUNDARIES, BANKS).unwrap();
        assert_eq!(data.departments.len(), 2);
        assert_eq!(data.banks.len(), 3);
        assert!(data.departments.get(FeatureId(0)).unwrap().geometry().is_some());

        // numeric 5 does not join with "05"; codes are compared as written
        assert_eq!(
            department(&data, 0).list_view(&data),
            ListView::Banks(vec![BankId(0), BankId(2)])
        );
        assert_eq!(department(&data, 1).list_view(&data), ListView::Empty);
    }

    #[test]
    fn either_bad_file_fails_the_whole_load() {
        assert!(Dataset::parse("not json", BANKS).is_err());
        assert!(Dataset::parse(BOUNDARIES, "{\"bank\": 1}").is_err());
    }
}
