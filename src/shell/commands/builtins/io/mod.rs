pub mod dragon;
