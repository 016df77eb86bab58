use apns_shared::ApnsConfig;

/// Process-wide gateway configuration, loaded once at startup and never
/// mutated afterwards
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub environment: String,
    pub port: u16,
    /// Present only when the full APNs key configuration is supplied;
    /// absent means the direct path runs disabled (degraded mode)
    pub apns: Option<ApnsConfig>,
    /// Google service account file for FCM; required
    pub fcm_credentials_path: String,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let environment =
            std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()?;

        let fcm_credentials_path = std::env::var("FCM_SERVICE_ACCOUNT_PATH")
            .map_err(|_| "FCM_SERVICE_ACCOUNT_PATH is required")?;

        let apns = match (
            std::env::var("APNS_KEY_PATH"),
            std::env::var("APNS_KEY_ID"),
            std::env::var("APNS_TEAM_ID"),
            std::env::var("APNS_BUNDLE_ID"),
        ) {
            (Ok(key_path), Ok(key_id), Ok(team_id), Ok(bundle_id)) => {
                let is_production = std::env::var("APNS_PRODUCTION")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false);
                Some(ApnsConfig::new(
                    key_path,
                    key_id,
                    team_id,
                    bundle_id,
                    is_production,
                ))
            }
            _ => None,
        };

        Ok(GatewayConfig {
            environment,
            port,
            apns,
            fcm_credentials_path,
        })
    }

    /// Host the direct path targets, when configured
    pub fn apns_host(&self) -> Option<&str> {
        self.apns.as_ref().map(|cfg| cfg.endpoint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apns_host_follows_environment_flag() {
        let cfg = GatewayConfig {
            environment: "production".to_string(),
            port: 8000,
            apns: Some(ApnsConfig::new(
                "/keys/AuthKey.p8".into(),
                "ABC123DEFG".into(),
                "TEAM123456".into(),
                "app.commeazy.ios".into(),
                true,
            )),
            fcm_credentials_path: "/keys/service-account.json".to_string(),
        };

        assert_eq!(cfg.apns_host(), Some("api.push.apple.com"));
    }

    #[test]
    fn test_apns_host_absent_in_degraded_mode() {
        let cfg = GatewayConfig {
            environment: "development".to_string(),
            port: 8000,
            apns: None,
            fcm_credentials_path: "/keys/service-account.json".to_string(),
        };

        assert_eq!(cfg.apns_host(), None);
    }
}
