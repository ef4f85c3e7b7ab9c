//! Public URL heuristic for uploaded audio assets
//!
//! Derives the externally reachable URL from the provider's hostname
//! conventions. This is a best-effort guess; it never verifies
//! reachability and never touches the network.

/// Substring identifying the managed cloud-hosting provider
const MANAGED_HOSTING_DOMAIN: &str = "radioboss.fm";

/// Port assumed for local development servers when none is configured
const LOCAL_FALLBACK_PORT: u16 = 8000;

/// Derive the public URL for an uploaded file.
///
/// Three mutually exclusive rules, evaluated in order: managed hosting gets
/// HTTPS without a port, local hosts get HTTP with the configured port (or
/// the local fallback), everything else gets plain HTTP without a port.
///
/// # Examples
///
/// ```
/// use broadcast_publisher::transport::resolve_public_url;
///
/// assert_eq!(
///     resolve_public_url("cloud.radioboss.fm", "dj/seg1.mp3", None),
///     "https://cloud.radioboss.fm/dj/seg1.mp3"
/// );
/// ```
pub fn resolve_public_url(host: &str, remote_path: &str, port: Option<u16>) -> String {
    if host.contains(MANAGED_HOSTING_DOMAIN) {
        format!("https://{}/{}", host, remote_path)
    } else if host == "localhost" || host == "127.0.0.1" {
        format!(
            "http://{}:{}/{}",
            host,
            port.unwrap_or(LOCAL_FALLBACK_PORT),
            remote_path
        )
    } else {
        format!("http://{}/{}", host, remote_path)
    }
}
