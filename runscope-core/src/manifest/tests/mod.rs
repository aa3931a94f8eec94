mod aggregate_tests;
mod classify_tests;
mod efficiency_tests;
