pub mod landmarks;
