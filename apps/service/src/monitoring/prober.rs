use anyhow::{Result, anyhow};
use std::net::IpAddr;
use std::time::Duration;
use surge_ping::{Client, Config, ICMP, PingIdentifier, PingSequence, SurgeError};

/// Reply from a single echo request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingReply {
    /// An echo reply was received within the timeout window
    Reply { rtt: Duration },
    /// No reply arrived before the timeout expired
    TimedOut,
}

/// Prober trait for issuing one reachability check against one host
///
/// Returning `Err` means the check itself could not be performed; a host
/// that simply does not answer is reported as `PingReply::TimedOut`.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    async fn ping(&self, host: &str, timeout: Duration) -> Result<PingReply>;
}

/// ICMP echo prober
///
/// Holds one client per address family; literal IP targets skip DNS,
/// hostnames resolve to their first address.
pub struct IcmpProber {
    client_v4: Client,
    client_v6: Client,
}

/// Standard echo payload size
const PAYLOAD: [u8; 56] = [0; 56];

impl IcmpProber {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client_v4: Client::new(&Config::default())?,
            client_v6: Client::new(&Config::builder().kind(ICMP::V6).build())?,
        })
    }

    async fn resolve(host: &str) -> Result<IpAddr> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| anyhow!("failed to resolve {host}: {e}"))?
            .next()
            .map(|addr| addr.ip())
            .ok_or_else(|| anyhow!("no addresses resolved for {host}"))
    }
}

#[async_trait::async_trait]
impl Prober for IcmpProber {
    async fn ping(&self, host: &str, timeout: Duration) -> Result<PingReply> {
        let ip = Self::resolve(host).await?;

        let client = match ip {
            IpAddr::V4(_) => &self.client_v4,
            IpAddr::V6(_) => &self.client_v6,
        };

        let mut pinger = client.pinger(ip, PingIdentifier(rand::random())).await;
        pinger.timeout(timeout);

        match pinger.ping(PingSequence(0), &PAYLOAD).await {
            Ok((_packet, rtt)) => Ok(PingReply::Reply { rtt }),
            Err(SurgeError::Timeout { .. }) => Ok(PingReply::TimedOut),
            Err(e) => Err(anyhow!("ping {host} failed: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolve_accepts_ip_literals_without_dns() {
        let ip = IcmpProber::resolve("127.0.0.1").await.unwrap();
        assert_eq!(ip, "127.0.0.1".parse::<IpAddr>().unwrap());

        let ip6 = IcmpProber::resolve("::1").await.unwrap();
        assert_eq!(ip6, "::1".parse::<IpAddr>().unwrap());
    }

    #[tokio::test]
    async fn resolve_rejects_unresolvable_names() {
        let err = IcmpProber::resolve("host.invalid.").await.unwrap_err();
        assert!(err.to_string().contains("host.invalid."));
    }
}
