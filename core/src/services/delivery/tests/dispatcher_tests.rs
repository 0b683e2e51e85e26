//! Unit tests for the delivery dispatcher

use pms_shared::config::{DeliveryConfig, OtpConfig, ProviderCredentials};
use std::sync::Arc;

use crate::domain::entities::otp::Channel;
use crate::errors::OtpError;
use crate::services::delivery::{DeliveryDispatcher, DispatcherConfig};
use crate::services::mocks::{MockMailSender, MockMessageSender};

fn dispatcher(
    config: DispatcherConfig,
) -> (
    DeliveryDispatcher,
    Arc<MockMailSender>,
    Arc<MockMessageSender>,
    Arc<MockMessageSender>,
) {
    let mailer = Arc::new(MockMailSender::new(false));
    let sms = Arc::new(MockMessageSender::new(false));
    let whatsapp = Arc::new(MockMessageSender::new(false));
    let dispatcher =
        DeliveryDispatcher::new(config, mailer.clone(), sms.clone(), whatsapp.clone());
    (dispatcher, mailer, sms, whatsapp)
}

#[tokio::test]
async fn test_email_without_sender_address_fails() {
    let (dispatcher, mailer, _, _) = dispatcher(DispatcherConfig::default());

    let result = dispatcher
        .dispatch(Channel::Email, "doctor@clinic.com", "123456")
        .await;
    assert_eq!(
        result,
        Err(OtpError::Delivery {
            message: "DEFAULT_FROM_EMAIL is not configured".to_string()
        })
    );
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_email_uses_subject_and_template() {
    let delivery = DeliveryConfig::default().with_from_email("noreply@clinic.test");
    let otp = OtpConfig {
        email_subject: "Clinic login".to_string(),
        email_template: "Code: {code}. Valid 5 minutes.".to_string(),
        ..OtpConfig::default()
    };
    let (dispatcher, mailer, _, _) = dispatcher(DispatcherConfig::new(&delivery, &otp));

    dispatcher
        .dispatch(Channel::Email, "doctor@clinic.com", "654321")
        .await
        .unwrap();

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, "noreply@clinic.test");
    assert_eq!(sent[0].subject, "Clinic login");
    assert_eq!(sent[0].body, "Code: 654321. Valid 5 minutes.");
}

#[tokio::test]
async fn test_sms_without_required_credentials_fails() {
    let delivery = DeliveryConfig::default().with_required_providers(true);
    let (dispatcher, _, sms, _) =
        dispatcher(DispatcherConfig::new(&delivery, &OtpConfig::default()));

    let result = dispatcher
        .dispatch(Channel::Sms, "+919876543210", "123456")
        .await;
    assert_eq!(
        result,
        Err(OtpError::Delivery {
            message: "SMS provider not configured".to_string()
        })
    );
    assert!(sms.sent().is_empty());
}

#[tokio::test]
async fn test_whatsapp_checks_its_own_credentials() {
    let mut delivery = DeliveryConfig::default().with_required_providers(true);
    delivery.sms = ProviderCredentials::new("AC1", "token", "+15550001111");
    let (dispatcher, _, sms, whatsapp) =
        dispatcher(DispatcherConfig::new(&delivery, &OtpConfig::default()));

    dispatcher
        .dispatch(Channel::Sms, "+919876543210", "123456")
        .await
        .unwrap();
    assert_eq!(sms.sent().len(), 1);

    let result = dispatcher
        .dispatch(Channel::Whatsapp, "+919876543210", "123456")
        .await;
    assert_eq!(
        result,
        Err(OtpError::Delivery {
            message: "WhatsApp provider not configured".to_string()
        })
    );
    assert!(whatsapp.sent().is_empty());
}

#[tokio::test]
async fn test_messages_sent_when_credentials_not_required() {
    let (dispatcher, _, _, whatsapp) = dispatcher(DispatcherConfig::default());

    dispatcher
        .dispatch(Channel::Whatsapp, "+919876543210", "777777")
        .await
        .unwrap();
    assert_eq!(
        whatsapp.sent(),
        vec![(
            "+919876543210".to_string(),
            "Your OTP code is: 777777".to_string()
        )]
    );
}

#[tokio::test]
async fn test_transport_failure_becomes_delivery_error() {
    let mailer = Arc::new(MockMailSender::new(true));
    let config = DispatcherConfig {
        from_email: Some("noreply@clinic.test".to_string()),
        ..DispatcherConfig::default()
    };
    let dispatcher = DeliveryDispatcher::new(
        config,
        mailer,
        Arc::new(MockMessageSender::new(true)),
        Arc::new(MockMessageSender::new(false)),
    );

    assert!(matches!(
        dispatcher.dispatch(Channel::Email, "doctor@clinic.com", "1").await,
        Err(OtpError::Delivery { .. })
    ));
    assert!(matches!(
        dispatcher.dispatch(Channel::Sms, "+919876543210", "1").await,
        Err(OtpError::Delivery { .. })
    ));
}
