mod preview_tests;
