mod matchmaking_tests;
