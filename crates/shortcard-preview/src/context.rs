/// Host used when neither a deployment override nor a request header is
/// available, i.e. bare local development.
pub const DEFAULT_HOST: &str = "localhost:3000";

/// Ambient request context, built once at the system boundary.
///
/// Host precedence: deployment-provided override, then the request `Host`
/// header, then [`DEFAULT_HOST`]. The override wins because it is the only
/// source guaranteed to be publicly reachable; the `Host` header may name
/// an internal address when the service sits behind a proxy.
///
/// Protocol precedence: the forwarded-protocol header, then `http` for
/// loopback/development hosts, then `https`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    host: String,
    protocol: String,
}

impl RequestContext {
    /// Resolves the context from its possible sources.
    ///
    /// Empty strings count as absent. Any scheme prefix on the host is
    /// stripped, since deployment variables sometimes carry one.
    pub fn from_parts(
        host_override: Option<&str>,
        host_header: Option<&str>,
        forwarded_proto: Option<&str>,
    ) -> Self {
        let host = host_override
            .filter(|h| !h.is_empty())
            .or_else(|| host_header.filter(|h| !h.is_empty()))
            .unwrap_or(DEFAULT_HOST);
        let host = strip_scheme(host).to_string();

        let is_local = is_loopback(&host);
        let protocol = forwarded_proto
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| if is_local { "http" } else { "https" }.to_string());

        Self { host, protocol }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// `protocol://host`, the base for relative asset paths.
    pub fn origin(&self) -> String {
        format!("{}://{}", self.protocol, self.host)
    }

    pub fn is_local(&self) -> bool {
        is_loopback(&self.host)
    }
}

fn strip_scheme(host: &str) -> &str {
    host.strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host)
}

fn is_loopback(host: &str) -> bool {
    host.contains("localhost") || host.starts_with("127.") || host.starts_with("[::1]")
}
