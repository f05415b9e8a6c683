pub mod assembly_emitter;

pub use assembly_emitter::X64LinuxEmitter;
