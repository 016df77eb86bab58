/// APNs Configuration
#[derive(Debug, Clone)]
pub struct ApnsConfig {
    /// Path to the `.p8` signing key (PEM, EC P-256)
    pub key_path: String,
    /// Key identifier issued alongside the signing key
    pub key_id: String,
    /// Developer team identifier, used as the token issuer
    pub team_id: String,
    /// App bundle identifier, sent as the `apns-topic` header
    pub bundle_id: String,
    pub is_production: bool,
}

impl ApnsConfig {
    pub fn new(
        key_path: String,
        key_id: String,
        team_id: String,
        bundle_id: String,
        is_production: bool,
    ) -> Self {
        Self {
            key_path,
            key_id,
            team_id,
            bundle_id,
            is_production,
        }
    }

    /// Get APNs API endpoint based on environment
    pub fn endpoint(&self) -> &str {
        if self.is_production {
            "api.push.apple.com"
        } else {
            "api.sandbox.push.apple.com"
        }
    }
}
