mod otp_tests;
