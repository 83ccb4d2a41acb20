pub mod blf_packer;
pub mod order;
pub mod preprocess;
pub mod validator;
