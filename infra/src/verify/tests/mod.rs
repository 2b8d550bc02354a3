mod messagebird_tests;
