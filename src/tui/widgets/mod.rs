pub mod backdrop;
pub mod input_buffer;
