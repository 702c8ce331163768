//! `check_ip_reputation`: AbuseIPDB-style reputation lookup over a fixed table.

use std::collections::HashMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use super::{string_arg, Tool, ToolCallContent, ToolSourceError, ToolSpec};

pub const TOOL_CHECK_IP_REPUTATION: &str = "check_ip_reputation";

/// Returned for addresses missing from the table.
pub const IP_NOT_FOUND: &str = "IP address not in database.";

#[allow(clippy::too_many_arguments)]
fn record(
    ip: &str,
    is_public: bool,
    whitelisted: bool,
    score: u8,
    country: Option<&str>,
    usage: &str,
    isp: Option<&str>,
    domain: Option<&str>,
    hostnames: &[&str],
    reports: (u32, u32, &str),
) -> Value {
    let (total_reports, distinct_users, last_reported) = reports;
    json!({
        "data": {
            "ipAddress": ip,
            "isPublic": is_public,
            "ipVersion": 4,
            "isWhitelisted": whitelisted,
            "abuseConfidenceScore": score,
            "countryCode": country,
            "usageType": usage,
            "isp": isp,
            "domain": domain,
            "hostnames": hostnames,
            "isTor": false,
            "totalReports": total_reports,
            "numDistinctUsers": distinct_users,
            "lastReportedAt": last_reported,
        }
    })
}

const HOSTING: &str = "Data Center/Web Hosting/Transit";

static REPUTATION: Lazy<HashMap<&'static str, Value>> = Lazy::new(|| {
    HashMap::from([
        (
            "118.25.6.39",
            record(
                "118.25.6.39",
                true,
                false,
                8,
                Some("CN"),
                HOSTING,
                Some("Tencent Cloud Computing (Beijing) Co., Ltd"),
                Some("tencent.com"),
                &[],
                (4, 3, "2025-12-25T11:02:21+00:00"),
            ),
        ),
        (
            "127.0.0.1",
            record(
                "127.0.0.1",
                false,
                false,
                0,
                None,
                "Reserved",
                None,
                None,
                &["localhost"],
                (2418, 277, "2025-12-27T23:34:47+00:00"),
            ),
        ),
        (
            "8.8.8.8",
            record(
                "8.8.8.8",
                true,
                true,
                0,
                Some("US"),
                "Content Delivery Network",
                Some("Google LLC"),
                Some("google.com"),
                &["dns.google"],
                (143, 55, "2025-12-24T09:57:47+00:00"),
            ),
        ),
        (
            "3.92.45.47",
            record(
                "3.92.45.47",
                true,
                false,
                100,
                Some("US"),
                HOSTING,
                Some("Amazon Data Services Northern Virginia"),
                Some("amazon.com"),
                &["ec2-3-92-45-47.compute-1.amazonaws.com"],
                (64, 44, "2025-12-27T23:37:35+00:00"),
            ),
        ),
        (
            "45.78.219.226",
            record(
                "45.78.219.226",
                true,
                false,
                100,
                Some("SG"),
                HOSTING,
                Some("BYTEPLUS"),
                Some("bytedance.com"),
                &[],
                (2468, 679, "2025-12-27T23:36:26+00:00"),
            ),
        ),
    ])
});

/// Looks up `ip` by exact match; `None` when the address is not in the table.
pub fn lookup(ip: &str) -> Option<&'static Value> {
    REPUTATION.get(ip)
}

/// Reputation tool. A score of 100 means the address is known malicious, 0 means no reason
/// for suspicion.
#[derive(Clone, Copy, Debug, Default)]
pub struct IpReputationTool;

#[async_trait]
impl Tool for IpReputationTool {
    fn name(&self) -> &str {
        TOOL_CHECK_IP_REPUTATION
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_CHECK_IP_REPUTATION.to_string(),
            description: Some(
                "Checks the reputation and validity of an IP address using AbuseIPDB data. \
                 A rating of 100 means the address is surely malicious, 0 means there is no \
                 reason to suspect it."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "ip": { "type": "string", "description": "The IP address to validate." }
                },
                "required": ["ip"]
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let ip = string_arg(&args, "ip")?;
        let text = match lookup(ip) {
            Some(record) => record.to_string(),
            None => IP_NOT_FOUND.to_string(),
        };
        Ok(ToolCallContent { text })
    }
}
