mod time_test;
