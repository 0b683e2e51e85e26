mod smtp_mailer_tests;
mod transports_tests;
