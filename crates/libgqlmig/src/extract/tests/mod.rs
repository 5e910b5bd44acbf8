mod normalize_tests;
