/// Prefix `https://` unless the host already carries an http(s) scheme.
///
/// The resolver keeps the host exactly as configured; this is applied only
/// when presenting it as a URL.
pub fn normalize_host(host: &str) -> String {
    let lower = host.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}
