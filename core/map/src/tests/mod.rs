
mod classify_tests;
mod run_app_tests;
mod status_tests;
