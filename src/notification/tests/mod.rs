mod reminder_tests;
