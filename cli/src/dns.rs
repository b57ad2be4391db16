use std::collections::HashMap;
use std::net::IpAddr;
use tracing::debug;

/// Reverse-DNS cache for connection hosts. A failed lookup caches the
/// address itself, so every IP is resolved at most once per run.
#[derive(Debug, Default)]
pub(crate) struct DnsCache {
    entries: HashMap<String, String>,
}

impl DnsCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn resolve(&mut self, ip: &str) -> String {
        if let Some(hostname) = self.entries.get(ip) {
            return hostname.clone();
        }
        let hostname = ip
            .parse::<IpAddr>()
            .ok()
            .and_then(|addr| dns_lookup::lookup_addr(&addr).ok())
            .unwrap_or_else(|| {
                debug!("reverse lookup failed for {ip}");
                ip.to_string()
            });
        self.entries.insert(ip.to_string(), hostname.clone());
        hostname
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_unparsable_address_resolves_to_itself() {
        let mut cache = DnsCache::new();
        assert_eq!(cache.resolve("not-an-ip"), "not-an-ip");
        // Second call is served from the cache.
        assert_eq!(cache.resolve("not-an-ip"), "not-an-ip");
        assert_eq!(cache.entries.len(), 1);
    }
}
