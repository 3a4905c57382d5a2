// Unit tests against the public gate API

#[path = "../common/mod.rs"]
mod common;

mod test_request_shapes;
