mod test_rtc_sessions_connect;
