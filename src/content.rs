use serde::Deserialize;

const SERVICES_JSON: &str = include_str!("../assets/services.json");

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Service {
    pub title: String,
    pub body: String,
    pub image: String,
    #[serde(default)]
    pub image_alt: String,
    #[serde(default)]
    pub points: Vec<String>,
}

/// Services bundled with the site.
pub fn services() -> Result<Vec<Service>, serde_json::Error> {
    parse_services(SERVICES_JSON)
}

pub fn parse_services(raw: &str) -> Result<Vec<Service>, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_parses() {
        let services = services().unwrap();
        assert!(services.len() >= 2);
        assert!(services.iter().all(|s| !s.title.is_empty() && s.image.starts_with("/assets/")));
    }

    #[test]
    fn optional_fields_default() {
        let services =
            parse_services(r#"[{"title": "Web", "body": "Sites.", "image": "/assets/web.webp"}]"#).unwrap();
        assert_eq!(services[0].image_alt, "");
        assert!(services[0].points.is_empty());
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        assert!(parse_services(r#"[{"title": "Web"}]"#).is_err());
        assert!(parse_services("not json").is_err());
    }
}
