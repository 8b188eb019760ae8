use super::*;

/// # Safety
/// Tests touching the process environment must not run concurrently with
/// other tests reading `CERTLEDGER_API_BASE_URL`.
unsafe fn clear_client_env() {
    unsafe {
        std::env::remove_var(API_BASE_URL_ENV);
    }
}

#[test]
fn default_points_at_local_backend() {
    assert_eq!(ClientConfig::default().api_base_url, "http://localhost:8080/api");
}

#[test]
fn with_base_url_trims_trailing_slashes() {
    let cfg = ClientConfig::with_base_url(" https://ledger.example.test/api// ");
    assert_eq!(cfg.api_base_url, "https://ledger.example.test/api");
}

#[test]
fn from_env_reads_override_then_falls_back() {
    unsafe {
        clear_client_env();
        std::env::set_var(API_BASE_URL_ENV, "http://10.0.0.5:9000/api/");
    }
    assert_eq!(ClientConfig::from_env().api_base_url, "http://10.0.0.5:9000/api");

    unsafe {
        std::env::set_var(API_BASE_URL_ENV, "   ");
    }
    assert_eq!(ClientConfig::from_env(), ClientConfig::default());

    unsafe { clear_client_env() };
    assert_eq!(ClientConfig::from_env(), ClientConfig::default());
}
