pub mod key;
pub mod publish;
