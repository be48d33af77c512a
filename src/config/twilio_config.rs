use std::env;

/// Credentials and destination numbers for the WhatsApp side-channel.
/// Loaded separately from [`crate::config::AppConfig`] because the whole
/// channel is optional: any missing variable disables sending.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub admin_number: String,
    pub delivery_number: String,
}

impl TwilioConfig {
    pub fn from_env() -> Option<Self> {
        let account_sid = env::var("TWILIO_ACCOUNT_SID").ok()?;
        let auth_token = env::var("TWILIO_AUTH_TOKEN").ok()?;
        let from_number = env::var("TWILIO_PHONE_NUMBER").ok()?;
        let admin_number = env::var("ADMIN_WHATSAPP").ok()?;
        let delivery_number = env::var("DELIVERY_WHATSAPP").ok()?;

        // Twilio account SIDs always start with "AC"; anything else is a
        // placeholder left in the environment.
        if !account_sid.starts_with("AC") {
            return None;
        }

        Some(Self {
            account_sid,
            auth_token,
            from_number,
            admin_number,
            delivery_number,
        })
    }
}
