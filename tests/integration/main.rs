mod cli_test;
mod search_test;
mod support;
