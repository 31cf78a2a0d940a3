use carepage::format::format_birth_date;
use carepage::{Endpoints, PageConfig, PageError};

#[test]
fn test_format_birth_date() {
    assert_eq!(format_birth_date("1941-03-09"), "09/03/1941");
    assert_eq!(format_birth_date("09/03/1941"), "09/03/1941");
    assert_eq!(format_birth_date("1941-03-09 00:00"), "1941-03-09 00:00");
    assert_eq!(format_birth_date(""), "");
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = PageConfig::from_json("{}").unwrap();
    assert_eq!(config.endpoints, Endpoints::default());
    assert_eq!(config.endpoints.stool_sheet, "/enregistre_selles");
    assert!(config.naissance.is_none());
    assert!(config.nodes.is_empty());
}

#[test]
fn test_config_overrides_some_endpoints() {
    let config = PageConfig::from_json(
        r#"{
            "endpoints": {"impression": "/recap/impression"},
            "naissance": "1941-03-09",
            "resident": {"nom_resident": "Jeanne Dupont", "oxygen": "Non", "diabete": "Oui"}
        }"#,
    )
    .unwrap();

    assert_eq!(config.endpoints.impression, "/recap/impression");
    assert_eq!(config.endpoints.update_status, "/update_status");
    assert_eq!(config.resident.diabete, "Oui");
}

#[test]
fn test_calendar_events_fill_defaults() {
    let config = PageConfig::from_json(
        r#"{"nodes": [
            {"Date": "2024-06-20", "Rendez-vous": "Dentiste", "Note": "À jeun"},
            {"Date": "2024-07-01"}
        ]}"#,
    )
    .unwrap();

    let events = config.calendar_events();
    assert_eq!(events[0].title, "Dentiste");
    assert_eq!(events[0].description, "À jeun");
    assert_eq!(events[1].title, "Rendez-vous");
    assert_eq!(events[1].start.as_deref(), Some("2024-07-01"));
    assert_eq!(events[1].description, "<Aucun commentaire>");
}

#[test]
fn test_invalid_config() {
    let err = PageConfig::from_json("{\"nodes\": 3}").unwrap_err();
    assert!(matches!(err, PageError::Config(_)));
    assert_eq!(err.user_message(), "Configuration de la page invalide.");
}

#[test]
fn test_endpoints_with_prefix() {
    let endpoints = Endpoints::default().with_prefix("/soins/");
    assert_eq!(endpoints.impression, "/soins/impression");
    assert_eq!(endpoints.stool_chart, "/soins/graphique_selles");
    assert_eq!(endpoints.delete_resident, "/soins/delete_resident");
}
