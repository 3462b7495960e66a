#![allow(dead_code)]

pub mod canned_http;
pub mod fake_api;
