pub mod cart_reader;
