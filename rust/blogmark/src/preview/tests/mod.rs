mod support;
mod hover_tests;
