pub mod document;
pub mod extract;
pub mod opcode;
pub mod render;
