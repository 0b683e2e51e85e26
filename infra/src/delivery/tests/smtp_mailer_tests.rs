use pms_shared::config::SmtpConfig;

use crate::delivery::SmtpMailer;

#[test]
fn test_build_message() {
    let message = SmtpMailer::build_message(
        "noreply@clinic.com",
        "doctor@clinic.com",
        "Your verification code",
        "Your OTP code is: 123456",
    )
    .unwrap();

    let raw = String::from_utf8(message.formatted()).unwrap();
    assert!(raw.contains("Subject: Your verification code"));
    assert!(raw.contains("Your OTP code is: 123456"));
}

#[test]
fn test_build_message_rejects_bad_address() {
    let result = SmtpMailer::build_message("not-an-address", "doctor@clinic.com", "s", "b");
    assert!(result.is_err());
}

#[tokio::test]
async fn test_mailer_construction() {
    let config = SmtpConfig {
        host: "smtp.clinic.test".to_string(),
        port: 587,
        username: Some("mailer".to_string()),
        password: Some("secret".to_string()),
    };

    assert!(SmtpMailer::new(&config).is_ok());
}
