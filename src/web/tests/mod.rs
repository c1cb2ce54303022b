mod task_routes_tests;
