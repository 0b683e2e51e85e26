use pms_shared::config::{Environment, ProviderCredentials, SmtpConfig};

use crate::delivery::{mail_transport, message_transport, TwilioChannel};
use crate::InfrastructureError;

fn relay() -> SmtpConfig {
    SmtpConfig {
        host: "smtp.clinic.test".to_string(),
        port: 587,
        username: None,
        password: None,
    }
}

#[tokio::test]
async fn test_console_mailer_only_in_development() {
    let mailer = mail_transport(Environment::Development, None).unwrap();
    mailer
        .send_mail("noreply@clinic.test", "doctor@clinic.test", "Code", "Your OTP code is: 482913")
        .await
        .unwrap();

    for environment in [Environment::Staging, Environment::Production] {
        match mail_transport(environment, None).err() {
            Some(InfrastructureError::Config(message)) => {
                assert!(message.contains("SMTP_HOST"));
                assert!(message.contains(environment.as_str()));
            }
            _ => panic!("expected a configuration error in {}", environment),
        }
    }
}

#[tokio::test]
async fn test_smtp_relay_used_when_configured() {
    assert!(mail_transport(Environment::Production, Some(&relay())).is_ok());
    assert!(mail_transport(Environment::Development, Some(&relay())).is_ok());
}

#[tokio::test]
async fn test_message_transport_falls_back_to_console() {
    let sender = message_transport(
        Environment::Production,
        TwilioChannel::Sms,
        &ProviderCredentials::default(),
    )
    .unwrap();

    let id = sender.send_message("+919876543210", "Your OTP code is: 482913").await.unwrap();
    assert_eq!(id, "console-sms-1");
}
