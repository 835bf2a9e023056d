use super::*;

#[test]
fn new_trims_trailing_slashes() {
    assert_eq!(ApiConfig::new("https://api.example.com//").base_url, "https://api.example.com");
}

#[test]
fn new_blank_falls_back_to_default() {
    assert_eq!(ApiConfig::new("   ").base_url, DEFAULT_API_BASE_URL);
    assert_eq!(ApiConfig::default().base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn endpoint_joins_with_single_slash() {
    let config = ApiConfig::new("http://localhost:8080/");
    assert_eq!(config.endpoint("/login"), "http://localhost:8080/login");
    assert_eq!(config.endpoint("products/7"), "http://localhost:8080/products/7");
}

#[test]
fn asset_url_prefixes_relative_paths() {
    let config = ApiConfig::default();
    assert_eq!(config.asset_url("uploads/a.png"), "http://localhost:8080/uploads/a.png");
}

#[test]
fn asset_url_keeps_absolute_urls() {
    let config = ApiConfig::default();
    assert_eq!(config.asset_url("https://cdn.test/a.png"), "https://cdn.test/a.png");
}
