mod build_resp;

pub use build_resp::{build_ack_resp, build_fail_resp, build_resp};
