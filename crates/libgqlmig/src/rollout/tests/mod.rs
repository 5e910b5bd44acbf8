mod rollback_tests;
