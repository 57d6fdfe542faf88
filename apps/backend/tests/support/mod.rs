#![allow(dead_code)]


pub use server::{join_pair, start_test_server, test_config, Pair, TestServer};
