pub mod match_code;
