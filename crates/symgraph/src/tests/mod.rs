mod property_tests;
mod tracer_tests;
