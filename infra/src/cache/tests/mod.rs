mod memory_cache_tests;
